use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

use crate::routes::helpers::{error_chain_fmt, json_error};

#[derive(thiserror::Error)]
pub enum SendEmailsError {
    #[error("No valid emails provided")]
    NoRecipients,
}

impl std::fmt::Debug for SendEmailsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for SendEmailsError {
    fn error_response(&self) -> HttpResponse {
        match self {
            SendEmailsError::NoRecipients => json_error(StatusCode::BAD_REQUEST, &self.to_string()),
        }
    }
}
