use std::ops::Deref;

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::error::InternalError;
use actix_web::http::header::HeaderMap;
use actix_web::middleware::Next;
use actix_web::{HttpMessage, HttpResponse, web};
use anyhow::Context;
use uuid::Uuid;

use crate::startup::TokenSecret;

use super::token::decode_token;

#[derive(Copy, Clone, Debug)]
pub struct UserId(Uuid);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl Deref for UserId {
    type Target = Uuid;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Verify the bearer token before the protected handler runs. A valid token
/// leaves the caller's `UserId` in the request extensions.
pub async fn reject_anonymous_users(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, actix_web::Error> {
    let secret = req
        .app_data::<web::Data<TokenSecret>>()
        .context("Token secret is not configured.")
        .map_err(actix_web::error::ErrorInternalServerError)?;

    match authenticate_request(req.headers(), secret) {
        Ok(user_id) => {
            req.extensions_mut().insert(UserId(user_id));
            next.call(req).await
        }
        Err(err) => {
            let response = HttpResponse::Unauthorized().json(serde_json::json!({
                "success": false,
                "message": "Unauthorized",
            }));
            Err(InternalError::from_response(err, response).into())
        }
    }
}

fn authenticate_request(headers: &HeaderMap, secret: &TokenSecret) -> Result<Uuid, anyhow::Error> {
    let token = bearer_token(headers)?;
    decode_token(token, &secret.0).context("Failed to verify the bearer token.")
}

fn bearer_token(headers: &HeaderMap) -> Result<&str, anyhow::Error> {
    let header_value = headers
        .get("Authorization")
        .context("The 'Authorization' header is missing.")?
        .to_str()
        .context("The 'Authorization' header was not a valid UTF8 string.")?;

    header_value
        .strip_prefix("Bearer ")
        .context("The authorization scheme is not 'Bearer'")
}
