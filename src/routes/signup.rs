use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError, web};
use anyhow::Context;
use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;
use uuid::Uuid;

use crate::authentication::compute_password_hash;
use crate::telemetry::spawn_blocking_with_tracing;

use super::helpers::{error_chain_fmt, json_error, json_error_with_detail};

#[derive(serde::Deserialize)]
pub struct SignupBody {
    email: String,
    password: SecretString,
}

#[derive(serde::Serialize)]
struct SignupResponse {
    success: bool,
    message: String,
}

#[derive(thiserror::Error)]
pub enum SignupError {
    #[error("A user with this email already exists")]
    AlreadyExists,
    #[error("{0}")]
    ValidationError(String),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for SignupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for SignupError {
    fn error_response(&self) -> HttpResponse {
        match self {
            SignupError::AlreadyExists | SignupError::ValidationError(_) => {
                json_error(StatusCode::BAD_REQUEST, &self.to_string())
            }
            SignupError::UnexpectedError(_) => json_error_with_detail(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error registering user",
                &self.to_string(),
            ),
        }
    }
}

#[tracing::instrument(
    name = "Registering a new user",
    skip(body, pool),
    fields(user_email = %body.email)
)]
pub async fn signup(
    body: web::Json<SignupBody>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, SignupError> {
    let SignupBody { email, password } = body.into_inner();
    if email.trim().is_empty() || password.expose_secret().is_empty() {
        return Err(SignupError::ValidationError(
            "Email and password are required".into(),
        ));
    }

    let password_hash = spawn_blocking_with_tracing(move || compute_password_hash(password))
        .await
        .context("Failed to spawn blocking task.")??;

    insert_user(&pool, &email, &password_hash).await?;

    Ok(HttpResponse::Ok().json(SignupResponse {
        success: true,
        message: "User registered successfully".into(),
    }))
}

#[tracing::instrument(name = "Saving new user in the database", skip(pool, password_hash))]
async fn insert_user(
    pool: &PgPool,
    email: &str,
    password_hash: &SecretString,
) -> Result<Uuid, SignupError> {
    let user_id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO users (user_id, email, password_hash, is_admin)
        VALUES ($1, $2, $3, FALSE)
        "#,
    )
    .bind(user_id)
    .bind(email)
    .bind(password_hash.expose_secret())
    .execute(pool)
    .await
    .map_err(|err| match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => SignupError::AlreadyExists,
        _ => SignupError::UnexpectedError(
            anyhow::Error::from(err).context("Failed to insert a new user in the database."),
        ),
    })?;

    Ok(user_id)
}
