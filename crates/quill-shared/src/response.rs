//! Message bodies returned by the API.

use serde::{Deserialize, Serialize};

/// Returned when a post id matches nothing.
pub const POST_NOT_FOUND: &str = "Post no encontrado";

/// Returned after a successful delete.
pub const POST_DELETED: &str = "Post eliminado con éxito";

/// `{"message": "..."}` body used for every error and for delete confirmations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn post_not_found() -> Self {
        Self::new(POST_NOT_FOUND)
    }

    pub fn post_deleted() -> Self {
        Self::new(POST_DELETED)
    }
}
