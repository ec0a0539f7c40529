//! Shared constants for upload validation, status classification, and URL lifetimes.

use std::time::Duration;

/// Maximum accepted upload size. Files strictly larger than this are rejected.
pub const MAX_UPLOAD_SIZE_BYTES: usize = 100 * 1024 * 1024;

/// Age after which a file without metadata is reported as still processing.
pub const PROCESSING_WINDOW_MINUTES: i64 = 10;

/// Lifetime of signed URLs handed out by listing and upload responses.
pub const LIST_SIGNED_URL_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Lifetime of signed URLs handed out by the single-file detail endpoint.
pub const DETAIL_SIGNED_URL_TTL: Duration = Duration::from_secs(60 * 60);

/// Allowed upload extensions, grouped by media kind. Extensions include the
/// leading dot and are compared against the lowercased file name.
pub const AUDIO_EXTENSIONS: [&str; 3] = [".mp3", ".wav", ".flac"];
pub const VIDEO_EXTENSIONS: [&str; 4] = [".mp4", ".avi", ".mov", ".mkv"];
pub const IMAGE_EXTENSIONS: [&str; 6] = [".jpg", ".jpeg", ".png", ".gif", ".bmp", ".webp"];

/// Static preview images served for non-image media in listings.
pub const VIDEO_THUMBNAIL_PATH: &str = "/video-thumbnail.jpg";
pub const AUDIO_THUMBNAIL_PATH: &str = "/audio-thumbnail.jpg";
pub const PLACEHOLDER_THUMBNAIL_PATH: &str = "/placeholder.jpg";

/// Default page size when the listing query does not specify a limit.
pub const DEFAULT_PAGE_LIMIT: usize = 100;
