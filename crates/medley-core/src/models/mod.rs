//! Domain models shared across the API, storage, and database layers.

mod file;
mod metadata;

pub use file::{FileDetails, FileKind, FileStatus, ReconciledFile, UploadedFile};
pub use metadata::{AiAnalysis, MetadataRecord};
