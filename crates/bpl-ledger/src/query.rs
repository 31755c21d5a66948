use bpl_types::LedgerEntry;

use crate::error::LedgerResult;
use crate::traits::LedgerReader;
use crate::validation::{ChainValidator, ValidationReport};

/// Read-only views over a ledger: full chain listing and on-demand audit.
pub struct LedgerQuery<R> {
    reader: R,
}

impl<R: LedgerReader> LedgerQuery<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// The full chain in index order. No mutation.
    pub fn list_all(&self) -> LedgerResult<Vec<LedgerEntry>> {
        self.reader.entries()
    }

    /// Walk the chain and report every invariant violation.
    ///
    /// This is the tamper-detection mechanism: callable on demand, not only
    /// run implicitly at load.
    pub fn verify(&self) -> LedgerResult<ValidationReport> {
        let entries = self.reader.entries()?;
        Ok(ChainValidator::validate(&entries))
    }
}
