use bpl_types::{Digest, LedgerEntry};
use tracing::debug;

use crate::error::LedgerResult;
use crate::traits::{ArtifactDigests, LedgerWriter};

/// Thin orchestration of "a file was ingested" events.
///
/// Resolves the artifact's digest — supplied by the caller, or computed from
/// the stored artifact via [`ArtifactDigests`] — and appends one entry to the
/// ledger. Holds no state of its own. Digest resolution happens before the
/// ledger's append lock is taken, so the lock is never held across artifact
/// I/O.
pub struct IngestionRecorder<L, A> {
    ledger: L,
    artifacts: A,
}

impl<L: LedgerWriter, A: ArtifactDigests> IngestionRecorder<L, A> {
    pub fn new(ledger: L, artifacts: A) -> Self {
        Self { ledger, artifacts }
    }

    /// Record an ingestion event and return the new entry.
    ///
    /// With `digest: None` the digest is computed from the stored artifact
    /// named `subject`; an absent artifact fails with `ArtifactNotFound`.
    pub fn record(&self, subject: &str, digest: Option<Digest>) -> LedgerResult<LedgerEntry> {
        let digest = match digest {
            Some(d) => d,
            None => self.artifacts.digest_of(subject)?,
        };
        let entry = self.ledger.append(subject, digest)?;
        debug!(index = entry.index, subject, "ingestion recorded");
        Ok(entry)
    }
}
