use thiserror::Error;

/// Errors from artifact storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// No stored artifact with the given name.
    #[error("artifact not found: {0}")]
    NotFound(String),

    /// The requested name sanitizes to nothing usable.
    #[error("invalid artifact name: {0:?}")]
    InvalidName(String),

    /// I/O error from the underlying filesystem.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
