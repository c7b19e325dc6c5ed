#[cfg(feature = "postgres")]
use std::sync::Arc;
use std::time::Duration;

#[cfg(feature = "postgres")]
use sea_orm::{ConnectOptions, Database, DbConn, DbErr};

/// Configuration for the post store database.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
}

/// Connection handle to the post store.
///
/// Opened once at startup and shared by every request. Repositories hold
/// their own reference to the connection; [`DatabaseHandle::close`] only
/// closes the pool once those references are gone.
///
/// # Example
/// ```ignore
/// let db = DatabaseHandle::connect(&config).await?;
/// let repo = PostgresPostRepository::new(db.conn());
/// // ... serve requests ...
/// db.close().await;
/// ```
#[cfg(feature = "postgres")]
#[derive(Clone)]
pub struct DatabaseHandle {
    conn: Arc<DbConn>,
}

#[cfg(feature = "postgres")]
impl DatabaseHandle {
    /// Open the connection pool.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DbErr> {
        tracing::info!("Connecting to the post store...");

        let opts = ConnectOptions::new(&config.url)
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(config.connect_timeout)
            .idle_timeout(Duration::from_secs(300))
            .sqlx_logging(true)
            .to_owned();

        let conn = Database::connect(opts).await?;
        tracing::info!(
            "Post store connected (pool: {}..{})",
            config.min_connections,
            config.max_connections
        );

        Ok(Self {
            conn: Arc::new(conn),
        })
    }

    /// A connection usable by repositories.
    pub fn conn(&self) -> Arc<DbConn> {
        Arc::clone(&self.conn)
    }

    /// Close the pool. Errors are logged, not returned.
    pub async fn close(self) {
        let Ok(conn) = Arc::try_unwrap(self.conn) else {
            tracing::warn!("Post store connection still in use, pool left to drop");
            return;
        };

        match conn.close().await {
            Ok(()) => tracing::info!("Post store connection closed"),
            Err(e) => tracing::warn!("Failed to close post store connection: {}", e),
        }
    }
}
