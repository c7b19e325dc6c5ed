use chrono::Utc;
use quill_core::domain::Post;
use quill_core::error::RepoError;
use quill_core::ports::{BaseRepository, PostRepository};
use sea_orm::{ConnAcquireErr, DatabaseBackend, DbErr, MockDatabase, MockExecResult, RuntimeErr};
use uuid::Uuid;

use crate::database::entity::post;
use crate::database::postgres_base::map_db_err;
use crate::database::postgres_repo::PostgresPostRepository;

fn model(title: &str) -> post::Model {
    post::Model {
        id: Uuid::new_v4(),
        title: title.to_owned(),
        content: "Content".to_owned(),
        date: Utc::now().into(),
        author: "ana".to_owned(),
        category: "news".to_owned(),
        image: String::new(),
        likes: 0,
        comments: 0,
    }
}

#[tokio::test]
async fn test_find_post_by_id() {
    let row = model("Test Post");
    let post_id = row.id;

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![row]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

    let post = result.expect("post should be found");
    assert_eq!(post.title, "Test Post");
    assert_eq!(post.id, post_id);
    assert_eq!(post.image, "");
}

#[tokio::test]
async fn test_find_all_maps_every_row() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![model("first"), model("second")]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let posts = repo.find_all().await.unwrap();

    let titles: Vec<&str> = posts.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, ["first", "second"]);
}

#[tokio::test]
async fn test_insert_returns_stored_post() {
    let row = model("Inserted");
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![row.clone()]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let saved = repo.insert(Post::from(row.clone())).await.unwrap();

    assert_eq!(saved.id, row.id);
    assert_eq!(saved.title, "Inserted");
}

#[tokio::test]
async fn test_update_of_missing_row_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<post::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let result = repo.update(Post::from(model("Gone"))).await;

    assert!(matches!(result, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn test_delete_of_missing_row_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let result = BaseRepository::<Post, Uuid>::delete(&repo, Uuid::new_v4()).await;

    assert!(matches!(result, Err(RepoError::NotFound)));
}

#[test]
fn test_connection_failures_map_to_connection_error() {
    let refused = map_db_err(DbErr::Conn(RuntimeErr::Internal("refused".to_owned())));
    assert!(matches!(refused, RepoError::Connection(msg) if msg.contains("refused")));

    let exhausted = map_db_err(DbErr::ConnectionAcquire(ConnAcquireErr::Timeout));
    assert!(matches!(exhausted, RepoError::Connection(_)));

    assert!(matches!(map_db_err(DbErr::RecordNotUpdated), RepoError::NotFound));
}

