//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`:
//! post repositories and the on-disk image store.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external services, in-memory store only
//! - `postgres` - PostgreSQL post store via SeaORM

pub mod database;
pub mod storage;

// Re-exports
pub use database::{DatabaseConfig, InMemoryPostRepository, UnavailablePostRepository};
pub use storage::DiskImageStore;

#[cfg(feature = "postgres")]
pub use database::{DatabaseHandle, PostgresPostRepository};
