//! Medley Core Library
//!
//! This crate provides the domain models, error types, configuration, and shared
//! constants used by all Medley components.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod storage_types;

// Re-export commonly used types
pub use config::{Config, MetadataBackend};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use storage_types::StorageBackend;
