//! Artifact storage for the Bio-Pipeline.
//!
//! Owns the upload directory: sanitized file names, save/read access, and
//! streaming content digests of stored artifacts. Implements the ledger's
//! [`ArtifactDigests`](bpl_ledger::ArtifactDigests) boundary so the
//! ingestion recorder can resolve digests without knowing storage layout.

pub mod error;
pub mod store;

pub use error::{StorageError, StorageResult};
pub use store::{has_fasta_extension, ArtifactStore};
