use std::error::Error;

use actix_web::{HttpResponse, http::StatusCode};

pub fn error_chain_fmt(e: &impl Error, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    writeln!(f, "{e}\n")?;
    let mut current = e.source();

    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{cause}")?;
        current = cause.source();
    }

    Ok(())
}

pub fn json_error(status: StatusCode, message: &str) -> HttpResponse {
    HttpResponse::build(status).json(serde_json::json!({
        "success": false,
        "message": message,
    }))
}

/// 500 bodies echo the internal detail to the caller. This mirrors the
/// original service's contract and is a known weakness, kept on purpose.
pub fn json_error_with_detail(status: StatusCode, message: &str, detail: &str) -> HttpResponse {
    HttpResponse::build(status).json(serde_json::json!({
        "success": false,
        "message": message,
        "error": detail,
    }))
}
