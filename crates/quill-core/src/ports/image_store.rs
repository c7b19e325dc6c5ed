//! Image storage port.

use async_trait::async_trait;

use crate::domain::ImageUpload;
use crate::error::UploadError;

/// Persists accepted uploads and hands back the URL they are served under.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Store the image under a generated unique name.
    /// Returns the relative reference path, e.g. `/uploads/1700000000000-cat.png`.
    async fn save(&self, upload: ImageUpload) -> Result<String, UploadError>;
}
