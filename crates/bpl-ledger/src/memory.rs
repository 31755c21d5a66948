use std::sync::Mutex;

use bpl_types::{Digest, LedgerEntry};

use crate::chain::next_entry;
use crate::error::{LedgerError, LedgerResult};
use crate::traits::{LedgerReader, LedgerWriter};

/// In-memory ledger for tests, local demos, and embedding.
///
/// Same append discipline as the file-backed store (mutex-serialized, tail
/// read under the lock), minus persistence.
#[derive(Default)]
pub struct InMemoryLedger {
    inner: Mutex<Vec<LedgerEntry>>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LedgerWriter for InMemoryLedger {
    fn append(&self, subject: &str, digest: Digest) -> LedgerResult<LedgerEntry> {
        let mut entries = self.inner.lock().map_err(|_| LedgerError::Poisoned)?;
        let entry = next_entry(entries.last(), subject, digest);
        entries.push(entry.clone());
        Ok(entry)
    }
}

impl LedgerReader for InMemoryLedger {
    fn entries(&self) -> LedgerResult<Vec<LedgerEntry>> {
        let entries = self.inner.lock().map_err(|_| LedgerError::Poisoned)?;
        Ok(entries.clone())
    }

    fn len(&self) -> LedgerResult<u64> {
        let entries = self.inner.lock().map_err(|_| LedgerError::Poisoned)?;
        Ok(entries.len() as u64)
    }

    fn head(&self) -> LedgerResult<Option<LedgerEntry>> {
        let entries = self.inner.lock().map_err(|_| LedgerError::Poisoned)?;
        Ok(entries.last().cloned())
    }
}
