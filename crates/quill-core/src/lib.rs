//! # Quill Core
//!
//! The domain layer of the Quill posts backend.
//! This crate contains the post model, the upload policy and the store
//! operations, with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use error::DomainError;
pub use service::PostService;
