use thiserror::Error;

/// Errors produced by ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// A referenced artifact does not exist (client error).
    #[error("artifact not found: {0}")]
    ArtifactNotFound(String),

    /// The persisted ledger document cannot be decoded, or decodes into a
    /// sequence that violates the chain invariants. Never auto-repaired.
    #[error("ledger corrupted: {reason}")]
    Corrupted { reason: String },

    /// Verification found a broken chain link or ordering rule. Reported
    /// with the offending entry's 1-based index; not fatal to the process.
    #[error("integrity violation at index {index}: {reason}")]
    Integrity { index: u64, reason: String },

    /// A writer panicked while holding the ledger lock.
    #[error("ledger lock poisoned")]
    Poisoned,

    /// Persistence read/write failure. Append guarantees no partial write
    /// occurred when this is returned.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding the ledger document failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result alias for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;
