use thiserror::Error;

/// Errors from FASTA parsing and QC computation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QcError {
    #[error("malformed FASTA: {0}")]
    Malformed(String),

    #[error("no sequences detected in FASTA")]
    NoRecords,

    #[error("sequences contain no informative bases")]
    NoInformativeBases,
}
