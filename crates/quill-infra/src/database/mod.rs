//! Post store implementations and connection management.

mod connections;
mod memory;
mod unavailable;

#[cfg(feature = "postgres")]
mod postgres_base;
#[cfg(feature = "postgres")]
pub mod postgres_repo;

#[cfg(feature = "postgres")]
pub mod entity;

pub use connections::DatabaseConfig;
pub use memory::InMemoryPostRepository;
pub use unavailable::UnavailablePostRepository;

#[cfg(feature = "postgres")]
pub use connections::DatabaseHandle;
#[cfg(feature = "postgres")]
pub use postgres_repo::PostgresPostRepository;

#[cfg(feature = "postgres")]
#[cfg(test)]
mod tests;
