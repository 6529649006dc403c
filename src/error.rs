//! Error types for `bzscan`

use thiserror::Error;

/// The error type for `bzscan` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Directory traversal error.
    #[error("directory walk error: {0}")]
    WalkDirError(String),

    // ==================== Configuration (INI) Errors ====================
    /// An INI line could not be classified as section, assignment, or comment.
    #[error("malformed INI line {line}: {content}")]
    IniMalformedLine {
        /// 1-based line number.
        line: usize,
        /// The offending line, trimmed.
        content: String,
    },

    /// An assignment appeared before any `[Section]` header.
    #[error("INI assignment before any section header at line {line}")]
    IniAssignmentOutsideSection {
        /// 1-based line number.
        line: usize,
    },

    // ==================== Report Errors ====================
    /// JSON serialization error when exporting a report.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

// Add conversion from walkdir::Error
impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        Error::WalkDirError(err.to_string())
    }
}

/// A specialized Result type for `bzscan` operations.
pub type Result<T> = std::result::Result<T, Error>;
