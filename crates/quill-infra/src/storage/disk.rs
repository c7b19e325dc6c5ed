//! Stores accepted images as plain files in the content directory.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;

use quill_core::domain::{ImageUpload, UPLOADS_ROUTE};
use quill_core::error::UploadError;
use quill_core::ports::ImageStore;

/// Image store backed by a local directory.
///
/// Files are never removed: replacing a post's image or deleting the post
/// leaves the old file in place.
#[derive(Debug, Clone)]
pub struct DiskImageStore {
    root: PathBuf,
}

impl DiskImageStore {
    /// Use `root` as the content directory, creating it if missing.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, UploadError> {
        let root = root.into();
        tokio::fs::create_dir_all(&root)
            .await
            .map_err(|e| io_error(&root, e))?;

        tracing::info!(dir = %root.display(), "Upload directory ready");
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create a file for `upload` that did not exist before.
    ///
    /// A name already taken (same file name in the same millisecond) moves
    /// the timestamp forward until a free one is found.
    async fn create_unique(&self, upload: &ImageUpload) -> Result<(String, File), UploadError> {
        let mut millis = Utc::now().timestamp_millis();
        loop {
            let stored_name = upload.stored_name(millis);
            let path = self.root.join(&stored_name);

            match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => return Ok((stored_name, file)),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => millis += 1,
                Err(e) => return Err(io_error(&path, e)),
            }
        }
    }
}

fn io_error(path: &Path, e: std::io::Error) -> UploadError {
    UploadError::Io(format!("{}: {}", path.display(), e))
}

#[async_trait]
impl ImageStore for DiskImageStore {
    async fn save(&self, upload: ImageUpload) -> Result<String, UploadError> {
        let (stored_name, mut file) = self.create_unique(&upload).await?;
        let path = self.root.join(&stored_name);

        file.write_all(upload.bytes())
            .await
            .map_err(|e| io_error(&path, e))?;
        file.flush().await.map_err(|e| io_error(&path, e))?;

        tracing::debug!(
            file = %stored_name,
            content_type = upload.content_type(),
            bytes = upload.bytes().len(),
            "Stored uploaded image"
        );

        Ok(format!("{}/{}", UPLOADS_ROUTE, stored_name))
    }
}
