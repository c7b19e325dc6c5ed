//! Repository standing in for a database that could not be reached.

use async_trait::async_trait;
use uuid::Uuid;

use quill_core::domain::Post;
use quill_core::error::RepoError;
use quill_core::ports::{BaseRepository, PostRepository};

/// Fails every call with a connection error.
///
/// Lets the HTTP listener start when the store is down at boot; each request
/// then reports a store failure instead of the process exiting.
pub struct UnavailablePostRepository {
    reason: String,
}

impl UnavailablePostRepository {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn err(&self) -> RepoError {
        RepoError::Connection(self.reason.clone())
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for UnavailablePostRepository {
    async fn find_by_id(&self, _id: Uuid) -> Result<Option<Post>, RepoError> {
        Err(self.err())
    }

    async fn insert(&self, _post: Post) -> Result<Post, RepoError> {
        Err(self.err())
    }

    async fn update(&self, _post: Post) -> Result<Post, RepoError> {
        Err(self.err())
    }

    async fn delete(&self, _id: Uuid) -> Result<(), RepoError> {
        Err(self.err())
    }
}

#[async_trait]
impl PostRepository for UnavailablePostRepository {
    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        Err(self.err())
    }
}
