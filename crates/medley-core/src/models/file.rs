//! File views returned by the API, plus the kind and status classifiers.
//!
//! A file's media kind is classified twice on purpose: uploads go by the file
//! extension (that is what the allow-list is written against), while listings
//! go by the stored content type (that is what the object store reports).

use crate::constants::{
    AUDIO_EXTENSIONS, IMAGE_EXTENSIONS, PROCESSING_WINDOW_MINUTES, VIDEO_EXTENSIONS,
};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Media kind of a stored file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Image,
    Video,
    Audio,
    Unknown,
}

impl FileKind {
    /// Classify by MIME type prefix. Used for listings and file details,
    /// where the stored content type is authoritative.
    pub fn from_content_type(content_type: &str) -> Self {
        if content_type.starts_with("image/") {
            FileKind::Image
        } else if content_type.starts_with("video/") {
            FileKind::Video
        } else if content_type.starts_with("audio/") {
            FileKind::Audio
        } else {
            FileKind::Unknown
        }
    }

    /// Classify by file extension against the upload allow-lists. The
    /// extension must include the leading dot and already be lowercased.
    /// Returns `None` for anything outside the allow-lists.
    pub fn from_allowed_extension(extension: &str) -> Option<Self> {
        if AUDIO_EXTENSIONS.contains(&extension) {
            Some(FileKind::Audio)
        } else if VIDEO_EXTENSIONS.contains(&extension) {
            Some(FileKind::Video)
        } else if IMAGE_EXTENSIONS.contains(&extension) {
            Some(FileKind::Image)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileKind::Image => "image",
            FileKind::Video => "video",
            FileKind::Audio => "audio",
            FileKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Processing status derived from metadata presence and file age
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Uploaded,
    Processing,
    Completed,
    Error,
}

impl FileStatus {
    /// Classify a file for listings. A file with metadata is completed. A file
    /// without metadata is counted as still processing only once it is strictly
    /// older than the processing window; younger files are freshly uploaded.
    pub fn classify(has_metadata: bool, created_at: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        if has_metadata {
            return FileStatus::Completed;
        }
        if now.signed_duration_since(created_at) > Duration::minutes(PROCESSING_WINDOW_MINUTES) {
            FileStatus::Processing
        } else {
            FileStatus::Uploaded
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileStatus::Uploaded => "uploaded",
            FileStatus::Processing => "processing",
            FileStatus::Completed => "completed",
            FileStatus::Error => "error",
        }
    }
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A listing entry joining the stored object with its metadata document
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciledFile {
    pub id: String,
    pub name: String,
    pub file_name: String,
    pub file_type: FileKind,
    pub size: u64,
    pub content_type: String,
    pub status: FileStatus,
    pub created_at: DateTime<Utc>,
    pub download_url: String,
    pub preview_url: String,
    pub public_url: String,
    pub has_metadata: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_analysis: Option<super::AiAnalysis>,
}

/// Storage-only view returned by the single-file detail endpoint.
/// `preview_url` is an explicit null for anything that is not an image.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDetails {
    pub id: String,
    pub name: String,
    pub file_name: String,
    pub file_type: FileKind,
    pub size: u64,
    pub content_type: String,
    pub created_at: DateTime<Utc>,
    pub download_url: String,
    pub preview_url: Option<String>,
    pub public_url: String,
}

/// View of a freshly uploaded file returned by the upload endpoint
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub id: String,
    pub name: String,
    pub file_name: String,
    pub size: u64,
    pub content_type: String,
    pub file_type: FileKind,
    pub status: FileStatus,
    pub created_at: DateTime<Utc>,
    pub download_url: String,
    pub preview_url: Option<String>,
    pub public_url: String,
}
