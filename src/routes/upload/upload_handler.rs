use std::path::Path;

use actix_multipart::{Field, Multipart};
use actix_web::HttpResponse;
use futures::TryStreamExt;

use crate::extractor::extract;

use super::errors::UploadError;
use super::storage::TransientFile;
use super::types::UploadResponse;

#[tracing::instrument(
    name = "Extracting addresses from an upload",
    skip(payload),
    fields(file_name = tracing::field::Empty)
)]
pub async fn upload(mut payload: Multipart) -> Result<HttpResponse, UploadError> {
    let mut staged: Option<(TransientFile, String)> = None;

    while let Some(field) = payload.try_next().await.map_err(UploadError::Multipart)? {
        let Some(filename) = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(ToOwned::to_owned)
        else {
            continue;
        };

        let extension = declared_extension(&filename);
        tracing::Span::current().record("file_name", tracing::field::display(&filename));

        let file = stage_field(field).await?;
        staged = Some((file, extension));
        break;
    }

    let (file, extension) = staged.ok_or(UploadError::MissingFile)?;
    let contents = file.contents().await?;
    let emails = extract(&contents, &extension).map_err(UploadError::Parse)?;

    // `file` drops here, removing the staged upload on every exit path.
    Ok(HttpResponse::Ok().json(UploadResponse {
        success: true,
        emails,
    }))
}

async fn stage_field(mut field: Field) -> Result<TransientFile, UploadError> {
    let mut file = TransientFile::create().await?;
    while let Some(chunk) = field.try_next().await.map_err(UploadError::Multipart)? {
        file.append(&chunk).await?;
    }

    Ok(file)
}

fn declared_extension(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}
