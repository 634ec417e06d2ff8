use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError, web};
use anyhow::Context;
use secrecy::SecretString;
use sqlx::PgPool;

use crate::authentication::{AuthError, Credentials, issue_token, validate_credentials};
use crate::startup::TokenSecret;

use super::helpers::{error_chain_fmt, json_error, json_error_with_detail};

#[derive(serde::Deserialize)]
pub struct LoginBody {
    email: String,
    password: SecretString,
}

#[derive(serde::Serialize)]
struct LoginResponse {
    success: bool,
    token: String,
    message: String,
}

#[derive(thiserror::Error)]
pub enum LoginError {
    #[error("Invalid email or password")]
    AuthError(#[source] anyhow::Error),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for LoginError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for LoginError {
    fn error_response(&self) -> HttpResponse {
        match self {
            LoginError::AuthError(_) => json_error(StatusCode::BAD_REQUEST, &self.to_string()),
            LoginError::UnexpectedError(_) => json_error_with_detail(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error logging in",
                &self.to_string(),
            ),
        }
    }
}

#[tracing::instrument(
    name = "Logging a user in",
    skip(body, pool, token_secret),
    fields(user_email = %body.email)
)]
pub async fn login(
    body: web::Json<LoginBody>,
    pool: web::Data<PgPool>,
    token_secret: web::Data<TokenSecret>,
) -> Result<HttpResponse, LoginError> {
    let LoginBody { email, password } = body.into_inner();
    let credentials = Credentials { email, password };

    let user_id = validate_credentials(credentials, &pool)
        .await
        .map_err(|err| match err {
            AuthError::UnknownUser | AuthError::InvalidPassword => {
                LoginError::AuthError(anyhow::Error::new(err))
            }
            AuthError::UnexpectedError(err) => LoginError::UnexpectedError(err),
        })?;

    let token = issue_token(user_id, &token_secret.0)
        .context("Failed to issue a session token.")
        .map_err(LoginError::UnexpectedError)?;

    Ok(HttpResponse::Ok().json(LoginResponse {
        success: true,
        token,
        message: "Login successful".into(),
    }))
}
