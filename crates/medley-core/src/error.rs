//! Application error types shared across crates.
//!
//! `AppError` is the single error enum that flows from repositories and services
//! up to the HTTP layer. Each variant carries static metadata (HTTP status,
//! machine-readable code, log level) so the API layer can render and log errors
//! uniformly without matching on variants at every call site.

use thiserror::Error;

/// Log level associated with an error type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Warn,
    Error,
}

/// Metadata every application error exposes to the HTTP layer.
pub trait ErrorMetadata {
    /// HTTP status code this error maps to
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code
    fn error_code(&self) -> &'static str;

    /// Severity used when the error is logged
    fn log_level(&self) -> LogLevel;

    /// Message safe to return to clients
    fn client_message(&self) -> String;
}

#[derive(Error, Debug)]
pub enum AppError {
    #[cfg(feature = "sqlx")]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{message}")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Static metadata for each error variant: (HTTP status, error code, log level).
fn app_error_static_metadata(error: &AppError) -> (u16, &'static str, LogLevel) {
    match error {
        #[cfg(feature = "sqlx")]
        AppError::Database(_) => (500, "DATABASE_ERROR", LogLevel::Error),
        AppError::Storage(_) => (500, "STORAGE_ERROR", LogLevel::Error),
        AppError::InvalidInput(_) => (400, "INVALID_INPUT", LogLevel::Debug),
        AppError::NotFound(_) => (404, "NOT_FOUND", LogLevel::Debug),
        AppError::Upstream(_) => (500, "UPSTREAM_ERROR", LogLevel::Error),
        AppError::Internal(_) => (500, "INTERNAL_ERROR", LogLevel::Error),
        AppError::InternalWithSource { .. } => (500, "INTERNAL_ERROR", LogLevel::Error),
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).2
    }

    fn client_message(&self) -> String {
        match self {
            #[cfg(feature = "sqlx")]
            AppError::Database(_) => "Failed to access database".to_string(),
            AppError::Storage(_) => "Failed to access storage".to_string(),
            AppError::InvalidInput(msg) => msg.clone(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::Upstream(msg) => msg.clone(),
            AppError::Internal(_) => "Internal server error".to_string(),
            // The message on this variant is written for clients; the source
            // carries the internal detail.
            AppError::InternalWithSource { message, .. } => message.clone(),
        }
    }
}

impl AppError {
    /// Short type name used as a structured logging field
    pub fn error_type(&self) -> &'static str {
        match self {
            #[cfg(feature = "sqlx")]
            AppError::Database(_) => "Database",
            AppError::Storage(_) => "Storage",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::NotFound(_) => "NotFound",
            AppError::Upstream(_) => "Upstream",
            AppError::Internal(_) => "Internal",
            AppError::InternalWithSource { .. } => "InternalWithSource",
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: "Internal server error".to_string(),
            source: err,
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidInput(format!("Invalid JSON: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_metadata() {
        let err = AppError::InvalidInput("bad field".to_string());
        assert_eq!(err.http_status_code(), 400);
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert_eq!(err.log_level(), LogLevel::Debug);
        assert_eq!(err.client_message(), "bad field");
    }

    #[test]
    fn test_not_found_metadata() {
        let err = AppError::NotFound("File not found: abc".to_string());
        assert_eq!(err.http_status_code(), 404);
        assert_eq!(err.error_code(), "NOT_FOUND");
        assert_eq!(err.client_message(), "File not found: abc");
    }

    #[test]
    fn test_internal_hides_detail_from_clients() {
        let err = AppError::Internal("connection pool exhausted".to_string());
        assert_eq!(err.http_status_code(), 500);
        assert_eq!(err.client_message(), "Internal server error");
    }

    #[test]
    fn test_internal_with_source_exposes_message_only() {
        let err = AppError::InternalWithSource {
            message: "Upload failed".to_string(),
            source: anyhow::anyhow!("bucket unreachable"),
        };
        assert_eq!(err.http_status_code(), 500);
        assert_eq!(err.log_level(), LogLevel::Error);
        assert_eq!(err.client_message(), "Upload failed");
        assert_eq!(err.to_string(), "Upload failed");
    }

    #[test]
    fn test_upstream_metadata() {
        let err = AppError::Upstream("Search failed".to_string());
        assert_eq!(err.http_status_code(), 500);
        assert_eq!(err.error_code(), "UPSTREAM_ERROR");
        assert_eq!(err.client_message(), "Search failed");
    }
}
