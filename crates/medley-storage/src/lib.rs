//! Medley Storage Library
//!
//! This crate provides the storage abstraction and its backends: S3 (and
//! S3-compatible providers) and the local filesystem.
//!
//! # Storage key format
//!
//! Keys are flat: `{epoch_millis}-{sanitized_file_name}`, produced at upload
//! time. Keys must not contain `..` or a leading `/`. Every object carries a
//! `{key}.meta.json` sidecar with its content type, original file name, and
//! upload timestamp; sidecars never appear in listings.

pub mod factory;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub(crate) mod sidecar;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
pub use medley_core::StorageBackend;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult, StoredObject};
