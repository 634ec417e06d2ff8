use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use actix_web::web;
use anyhow::Context;
use uuid::Uuid;

const UPLOAD_DIR: &str = "uploads";

/// An uploaded file staged on disk under a random name. The file is removed
/// when the guard goes out of scope, on success and failure paths alike;
/// a failed removal is logged, never fatal.
pub struct TransientFile {
    path: PathBuf,
    file: Option<File>,
}

impl TransientFile {
    pub async fn create() -> Result<Self, anyhow::Error> {
        let path = Path::new(UPLOAD_DIR).join(Uuid::new_v4().to_string());
        let file = web::block({
            let path = path.clone();
            move || -> Result<File, std::io::Error> {
                std::fs::create_dir_all(UPLOAD_DIR)?;
                File::create(&path)
            }
        })
        .await
        .context("Failed to run blocking file creation.")?
        .context("Failed to create a staging file for the upload.")?;

        Ok(Self {
            path,
            file: Some(file),
        })
    }

    pub async fn append(&mut self, chunk: &[u8]) -> Result<(), anyhow::Error> {
        let mut file = self
            .file
            .take()
            .context("The staging file handle is gone.")?;
        let data = chunk.to_vec();

        let file = web::block(move || file.write_all(&data).map(|_| file))
            .await
            .context("Failed to run blocking file write.")?
            .context("Failed to write an uploaded chunk.")?;

        self.file = Some(file);
        Ok(())
    }

    pub async fn contents(&self) -> Result<Vec<u8>, anyhow::Error> {
        let path = self.path.clone();
        web::block(move || std::fs::read(path))
            .await
            .context("Failed to run blocking file read.")?
            .context("Failed to read the staged upload back.")
    }
}

impl Drop for TransientFile {
    fn drop(&mut self) {
        self.file.take();
        if let Err(err) = std::fs::remove_file(&self.path) {
            tracing::warn!(
                error = %err,
                path = %self.path.display(),
                "Failed to delete a transient upload"
            );
        }
    }
}
