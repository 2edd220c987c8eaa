use std::io;

use thiserror::Error;

/// Failure kinds of store operations.
///
/// The `Display` text is what lands in the audit log after the `ERROR` prefix.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("no such file or directory {0}")]
    NotFound(String),
    #[error("malformed document {file}: {reason}")]
    MalformedDocument { file: String, reason: String },
    #[error("io error on {file}: {reason}")]
    Io { file: String, reason: String },
    #[error("file already exists {0}")]
    AlreadyExists(String),
    #[error("validation error: {0}")]
    Validation(String),
}

impl ServiceError {
    /// Classify an `io::Error` raised while touching `file`.
    pub fn from_io(file: &str, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound(file.to_string()),
            io::ErrorKind::AlreadyExists => Self::AlreadyExists(file.to_string()),
            _ => Self::Io { file: file.to_string(), reason: err.to_string() },
        }
    }

    /// Any I/O failure on a write path, whatever its kind.
    pub fn io(file: &str, err: io::Error) -> Self {
        Self::Io { file: file.to_string(), reason: err.to_string() }
    }

    pub fn malformed(file: &str, reason: impl ToString) -> Self {
        Self::MalformedDocument { file: file.to_string(), reason: reason.to_string() }
    }

    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::MalformedDocument { .. } => "malformed",
            Self::Io { .. } => "io",
            Self::AlreadyExists(_) => "already_exists",
            Self::Validation(_) => "validation",
        }
    }
}
