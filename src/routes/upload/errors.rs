use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

use crate::extractor::ExtractError;
use crate::routes::helpers::{error_chain_fmt, json_error, json_error_with_detail};

#[derive(thiserror::Error)]
pub enum UploadError {
    #[error("No file uploaded")]
    MissingFile,
    #[error("Malformed multipart payload")]
    Multipart(#[source] actix_multipart::MultipartError),
    #[error("Error processing file")]
    Parse(#[source] ExtractError),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for UploadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for UploadError {
    fn error_response(&self) -> HttpResponse {
        match self {
            UploadError::MissingFile | UploadError::Multipart(_) => {
                json_error(StatusCode::BAD_REQUEST, &self.to_string())
            }
            UploadError::Parse(source) => json_error_with_detail(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error processing file",
                &source.to_string(),
            ),
            UploadError::UnexpectedError(_) => json_error_with_detail(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error processing file",
                &self.to_string(),
            ),
        }
    }
}
