//! Audit-related error types.

use thiserror::Error;

/// Errors that can occur with the claim history file.
#[derive(Debug, Error)]
pub enum AuditError {
    /// Storage error (create, write, or rename failed).
    #[error("storage error at {path}: {source}")]
    StorageError {
        /// The history file path.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Serialization error.
    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type for audit operations.
pub type AuditResult<T> = Result<T, AuditError>;
