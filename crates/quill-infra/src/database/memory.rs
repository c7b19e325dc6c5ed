//! In-memory post repository - used when no database is configured.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::Post;
use quill_core::error::RepoError;
use quill_core::ports::{BaseRepository, PostRepository};

/// In-memory post store using a Vec behind an async RwLock.
///
/// Keeps posts in insertion order.
/// Note: Data is lost on process restart.
pub struct InMemoryPostRepository {
    posts: RwLock<Vec<Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            posts: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|p| p.id == id).cloned())
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        let mut posts = self.posts.write().await;
        if posts.iter().any(|p| p.id == post.id) {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }
        posts.push(post.clone());
        Ok(post)
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let mut posts = self.posts.write().await;
        let slot = posts
            .iter_mut()
            .find(|p| p.id == post.id)
            .ok_or(RepoError::NotFound)?;
        *slot = post.clone();
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut posts = self.posts.write().await;
        let index = posts
            .iter()
            .position(|p| p.id == id)
            .ok_or(RepoError::NotFound)?;
        posts.remove(index);
        Ok(())
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        Ok(self.posts.read().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use quill_core::domain::PostFields;

    use super::*;

    fn post(title: &str) -> Post {
        Post::create(PostFields {
            title: Some(title.into()),
            content: Some("c".into()),
            author: Some("a".into()),
            category: Some("k".into()),
            ..Default::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_find_all_keeps_insertion_order() {
        let repo = InMemoryPostRepository::new();
        for title in ["b", "a", "c"] {
            repo.insert(post(title)).await.unwrap();
        }

        let titles: Vec<String> = repo
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, ["b", "a", "c"]);
    }

    #[tokio::test]
    async fn test_update_replaces_in_place() {
        let repo = InMemoryPostRepository::new();
        let first = repo.insert(post("first")).await.unwrap();
        repo.insert(post("second")).await.unwrap();

        let mut changed = first.clone();
        changed.title = "changed".into();
        repo.update(changed).await.unwrap();

        let all = repo.find_all().await.unwrap();
        assert_eq!(all[0].title, "changed");
        assert_eq!(all[0].id, first.id);
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_update_and_delete_missing() {
        let repo = InMemoryPostRepository::new();
        let ghost = post("ghost");

        assert!(matches!(repo.update(ghost.clone()).await, Err(RepoError::NotFound)));
        assert!(matches!(repo.delete(ghost.id).await, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_delete_removes_post() {
        let repo = InMemoryPostRepository::new();
        let saved = repo.insert(post("x")).await.unwrap();

        repo.delete(saved.id).await.unwrap();
        assert_eq!(repo.find_by_id(saved.id).await.unwrap(), None);
    }
}
