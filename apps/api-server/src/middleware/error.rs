//! Error handling - every failure becomes a `{"message": ...}` body.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use quill_core::DomainError;
use quill_core::error::UploadError;
use quill_shared::MessageResponse;
use std::fmt;

/// Application-level error type that converts to message responses.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Internal(String),
}

impl AppError {
    pub fn post_not_found() -> Self {
        AppError::NotFound(quill_shared::response::POST_NOT_FOUND.to_string())
    }

    /// Map a domain failure for a handler whose other failures report as
    /// `fallback` (`AppError::Internal` or `AppError::BadRequest`).
    ///
    /// A missing post is always a 404. Store failures are logged with their
    /// detail and reported without it.
    pub fn from_domain(err: impl Into<DomainError>, fallback: fn(String) -> AppError) -> Self {
        match err.into() {
            DomainError::NotFound { entity_type, id } => {
                tracing::debug!("{} {} not found", entity_type, id);
                AppError::post_not_found()
            }
            DomainError::Repository(repo_err) => {
                tracing::error!("Post store error: {}", repo_err);
                fallback("Database error".to_string())
            }
            DomainError::Upload(UploadError::Io(detail)) => {
                tracing::error!("Upload storage error: {}", detail);
                fallback("Failed to store upload".to_string())
            }
            other => fallback(other.to_string()),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            AppError::NotFound(msg) | AppError::BadRequest(msg) | AppError::Internal(msg) => msg,
        };

        HttpResponse::build(self.status_code()).json(MessageResponse::new(message.as_str()))
    }
}

// Rejections raised while reading a submitted form
impl From<UploadError> for AppError {
    fn from(err: UploadError) -> Self {
        AppError::from_domain(err, AppError::BadRequest)
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use quill_core::error::RepoError;

    #[test]
    fn test_not_found_ignores_fallback() {
        let err = DomainError::NotFound {
            entity_type: "Post",
            id: uuid::Uuid::new_v4(),
        };
        let app_err = AppError::from_domain(err, AppError::BadRequest);
        assert_eq!(app_err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_store_errors_hide_detail() {
        let err = RepoError::Query("relation \"posts\" does not exist".into());
        match AppError::from_domain(DomainError::from(err), AppError::Internal) {
            AppError::Internal(msg) => assert_eq!(msg, "Database error"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_invalid_id_uses_fallback() {
        let err = DomainError::InvalidId("abc".into());
        let app_err = AppError::from_domain(err, AppError::Internal);
        assert_eq!(app_err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let err = DomainError::InvalidId("abc".into());
        let app_err = AppError::from_domain(err, AppError::BadRequest);
        assert_eq!(app_err.status_code(), StatusCode::BAD_REQUEST);
    }
}
