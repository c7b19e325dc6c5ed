//! Post store operations on top of a [`PostRepository`].

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Post, PostFields};
use crate::error::{DomainError, RepoError};
use crate::ports::PostRepository;

const ENTITY: &str = "Post";

/// Create, read, update and delete posts.
///
/// Identifiers arrive as raw path segments; a segment that is not a UUID
/// fails with [`DomainError::InvalidId`] before the repository is touched.
#[derive(Clone)]
pub struct PostService {
    repo: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> Result<Vec<Post>, DomainError> {
        Ok(self.repo.find_all().await?)
    }

    pub async fn get(&self, raw_id: &str) -> Result<Post, DomainError> {
        let id = parse_id(raw_id)?;
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound {
                entity_type: ENTITY,
                id,
            })
    }

    pub async fn create(&self, fields: PostFields) -> Result<Post, DomainError> {
        let post = Post::create(fields)?;
        Ok(self.repo.insert(post).await?)
    }

    pub async fn update(&self, raw_id: &str, fields: PostFields) -> Result<Post, DomainError> {
        let mut post = self.get(raw_id).await?;
        let id = post.id;
        post.apply(fields)?;
        self.repo
            .update(post)
            .await
            .map_err(|err| not_found_or(err, id))
    }

    pub async fn delete(&self, raw_id: &str) -> Result<(), DomainError> {
        let id = parse_id(raw_id)?;
        self.repo
            .delete(id)
            .await
            .map_err(|err| not_found_or(err, id))
    }
}

fn parse_id(raw: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(raw).map_err(|_| DomainError::InvalidId(raw.to_string()))
}

fn not_found_or(err: RepoError, id: Uuid) -> DomainError {
    match err {
        RepoError::NotFound => DomainError::NotFound {
            entity_type: ENTITY,
            id,
        },
        other => other.into(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::ports::BaseRepository;

    /// Vec-backed repository; `lose_updates` simulates a concurrent delete.
    #[derive(Default)]
    struct VecRepository {
        posts: Mutex<Vec<Post>>,
        lose_updates: bool,
    }

    #[async_trait]
    impl BaseRepository<Post, Uuid> for VecRepository {
        async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
            let posts = self.posts.lock().unwrap();
            Ok(posts.iter().find(|p| p.id == id).cloned())
        }

        async fn insert(&self, post: Post) -> Result<Post, RepoError> {
            self.posts.lock().unwrap().push(post.clone());
            Ok(post)
        }

        async fn update(&self, post: Post) -> Result<Post, RepoError> {
            if self.lose_updates {
                return Err(RepoError::NotFound);
            }
            let mut posts = self.posts.lock().unwrap();
            let slot = posts
                .iter_mut()
                .find(|p| p.id == post.id)
                .ok_or(RepoError::NotFound)?;
            *slot = post.clone();
            Ok(post)
        }

        async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
            let mut posts = self.posts.lock().unwrap();
            let before = posts.len();
            posts.retain(|p| p.id != id);
            if posts.len() == before {
                return Err(RepoError::NotFound);
            }
            Ok(())
        }
    }

    #[async_trait]
    impl PostRepository for VecRepository {
        async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
            Ok(self.posts.lock().unwrap().clone())
        }
    }

    fn fields(title: &str) -> PostFields {
        PostFields {
            title: Some(title.into()),
            content: Some("body".into()),
            author: Some("ana".into()),
            category: Some("misc".into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let service = PostService::new(Arc::new(VecRepository::default()));
        let created = service.create(fields("one")).await.unwrap();

        let fetched = service.get(&created.id.to_string()).await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(service.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_invalid_is_not_persisted() {
        let repo = Arc::new(VecRepository::default());
        let service = PostService::new(repo.clone());

        let mut incomplete = fields("one");
        incomplete.title = None;
        assert!(matches!(
            service.create(incomplete).await,
            Err(DomainError::Validation(_))
        ));
        assert!(repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_id_is_rejected() {
        let service = PostService::new(Arc::new(VecRepository::default()));
        assert!(matches!(
            service.get("not-a-uuid").await,
            Err(DomainError::InvalidId(raw)) if raw == "not-a-uuid"
        ));
        assert!(matches!(
            service.delete("42").await,
            Err(DomainError::InvalidId(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_post_is_not_found() {
        let service = PostService::new(Arc::new(VecRepository::default()));
        let id = Uuid::new_v4().to_string();

        assert!(matches!(service.get(&id).await, Err(DomainError::NotFound { .. })));
        assert!(matches!(
            service.update(&id, fields("x")).await,
            Err(DomainError::NotFound { .. })
        ));
        assert!(matches!(service.delete(&id).await, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_update_racing_delete_is_not_found() {
        let repo = Arc::new(VecRepository {
            lose_updates: true,
            ..Default::default()
        });
        let service = PostService::new(repo);
        let created = service.create(fields("one")).await.unwrap();

        let result = service.update(&created.id.to_string(), fields("two")).await;
        assert!(matches!(result, Err(DomainError::NotFound { id, .. }) if id == created.id));
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let service = PostService::new(Arc::new(VecRepository::default()));
        let id = service.create(fields("one")).await.unwrap().id.to_string();

        service.delete(&id).await.unwrap();
        assert!(matches!(service.delete(&id).await, Err(DomainError::NotFound { .. })));
    }
}
