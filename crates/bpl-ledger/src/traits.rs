use std::sync::Arc;

use bpl_types::{Digest, LedgerEntry};

use crate::error::LedgerResult;

/// Read boundary for ledger query operations.
///
/// Reads may run concurrently with each other and with an in-flight append;
/// they observe either the pre- or post-state of that append, never a
/// partially-applied one.
pub trait LedgerReader: Send + Sync {
    /// The full chain in index order.
    fn entries(&self) -> LedgerResult<Vec<LedgerEntry>>;

    /// Number of entries in the ledger.
    fn len(&self) -> LedgerResult<u64>;

    fn is_empty(&self) -> LedgerResult<bool> {
        Ok(self.len()? == 0)
    }

    /// The tail entry, or `None` for an empty ledger.
    fn head(&self) -> LedgerResult<Option<LedgerEntry>>;
}

/// Write boundary for ledger append operations.
///
/// Implementations must serialize appends: at most one append is in progress
/// at a time, so two concurrent calls can never compute the same index or an
/// inconsistent previous-digest link from a stale tail.
pub trait LedgerWriter: Send + Sync {
    /// Append a new entry for `subject` with the given content digest.
    ///
    /// The digest is always supplied by the caller; resolving it from stored
    /// artifacts is the recorder's job, and happens before any lock is taken.
    fn append(&self, subject: &str, digest: Digest) -> LedgerResult<LedgerEntry>;
}

/// Digest lookup for stored artifacts.
///
/// Implemented by the artifact store; lets the recorder resolve a digest for
/// a subject without coupling the ledger to storage layout.
pub trait ArtifactDigests: Send + Sync {
    /// Content digest of the artifact named `subject`.
    ///
    /// Fails with `ArtifactNotFound` if no such artifact is stored.
    fn digest_of(&self, subject: &str) -> LedgerResult<Digest>;
}

impl<T: LedgerReader + ?Sized> LedgerReader for Arc<T> {
    fn entries(&self) -> LedgerResult<Vec<LedgerEntry>> {
        (**self).entries()
    }

    fn len(&self) -> LedgerResult<u64> {
        (**self).len()
    }

    fn head(&self) -> LedgerResult<Option<LedgerEntry>> {
        (**self).head()
    }
}

impl<T: LedgerWriter + ?Sized> LedgerWriter for Arc<T> {
    fn append(&self, subject: &str, digest: Digest) -> LedgerResult<LedgerEntry> {
        (**self).append(subject, digest)
    }
}

impl<T: ArtifactDigests + ?Sized> ArtifactDigests for Arc<T> {
    fn digest_of(&self, subject: &str) -> LedgerResult<Digest> {
        (**self).digest_of(subject)
    }
}
