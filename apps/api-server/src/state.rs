//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::PostService;
use quill_core::ports::{ImageStore, PostRepository};
use quill_infra::{DiskImageStore, InMemoryPostRepository};

#[cfg(feature = "postgres")]
use quill_infra::{DatabaseHandle, PostgresPostRepository, UnavailablePostRepository};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
    pub images: Arc<dyn ImageStore>,
    /// Which post store backs `posts`, reported by the health check.
    pub store: &'static str,
    #[cfg(feature = "postgres")]
    pub db: Option<DatabaseHandle>,
}

impl AppState {
    /// State over explicit backends and no database handle.
    pub fn new(
        repo: Arc<dyn PostRepository>,
        images: Arc<dyn ImageStore>,
        store: &'static str,
    ) -> Self {
        Self {
            posts: PostService::new(repo),
            images,
            store,
            #[cfg(feature = "postgres")]
            db: None,
        }
    }

    /// Build the application state with appropriate implementations.
    ///
    /// A database that cannot be reached is logged and replaced by a
    /// repository that fails every call, so the server still starts.
    pub async fn from_config(config: &AppConfig) -> std::io::Result<Self> {
        let images: Arc<dyn ImageStore> = Arc::new(
            DiskImageStore::open(&config.upload_dir)
                .await
                .map_err(std::io::Error::other)?,
        );

        #[cfg(feature = "postgres")]
        let state = match &config.database {
            Some(db_config) => match DatabaseHandle::connect(db_config).await {
                Ok(db) => {
                    run_migrations(&db).await;
                    let repo = Arc::new(PostgresPostRepository::new(db.conn()));
                    let mut state = Self::new(repo, images, "postgres");
                    state.db = Some(db);
                    state
                }
                Err(e) => {
                    tracing::error!("Failed to connect to database: {}", e);
                    let repo = Arc::new(UnavailablePostRepository::new(e.to_string()));
                    Self::new(repo, images, "unavailable")
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                Self::new(Arc::new(InMemoryPostRepository::new()), images, "memory")
            }
        };

        #[cfg(not(feature = "postgres"))]
        let state = {
            if config.database.is_some() {
                tracing::warn!("Built without postgres feature - ignoring DATABASE_URL");
            }
            tracing::info!("Running without postgres feature - using in-memory repository");
            Self::new(Arc::new(InMemoryPostRepository::new()), images, "memory")
        };

        tracing::info!(store = state.store, "Application state initialized");

        Ok(state)
    }

    /// Release the store connection. Called once the server has stopped.
    #[cfg(feature = "postgres")]
    pub async fn close(self) {
        let Self { posts, db, .. } = self;
        // The repository holds the other reference to the pool.
        drop(posts);

        if let Some(db) = db {
            db.close().await;
        }
    }

    #[cfg(not(feature = "postgres"))]
    pub async fn close(self) {}
}

/// Bring the schema up to date. Failures are logged; queries will then
/// surface the problem per request.
#[cfg(feature = "postgres")]
async fn run_migrations(db: &DatabaseHandle) {
    use migration::{Migrator, MigratorTrait};

    let conn = db.conn();
    match Migrator::up(conn.as_ref(), None).await {
        Ok(()) => tracing::info!("Database migrations applied"),
        Err(e) => tracing::error!("Failed to apply database migrations: {}", e),
    }
}
