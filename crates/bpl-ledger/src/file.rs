use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use bpl_types::{Digest, LedgerEntry};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::chain::next_entry;
use crate::error::{LedgerError, LedgerResult};
use crate::traits::{LedgerReader, LedgerWriter};
use crate::validation::ChainValidator;

/// JSON-document-backed ledger store.
///
/// The entire chain is persisted as a single JSON array. Every append
/// rewrites the document atomically: the updated array is written to a
/// temporary file in the same directory, synced, and renamed over the
/// target. A crash mid-persist leaves the previous document intact; a
/// subsequent load never observes a partially-written ledger.
///
/// Appends are serialized by a mutex over the in-memory sequence. A failed
/// persist leaves both disk and memory at the prior (last-known-good) state.
#[derive(Debug)]
pub struct FileLedger {
    path: PathBuf,
    inner: Mutex<Vec<LedgerEntry>>,
}

impl FileLedger {
    /// Load the persisted ledger at `path`.
    ///
    /// A missing file yields an empty ledger and lazily creates an empty
    /// persisted document. A file that exists but cannot be strictly decoded
    /// fails with [`LedgerError::Corrupted`]; the store refuses to construct
    /// rather than operate on unreadable history.
    pub fn open(path: impl Into<PathBuf>) -> LedgerResult<Self> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str::<Vec<LedgerEntry>>(&raw).map_err(|e| {
                LedgerError::Corrupted {
                    reason: format!("{}: {e}", path.display()),
                }
            })?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let empty = Vec::new();
                persist(&path, &empty)?;
                empty
            }
            Err(e) => return Err(e.into()),
        };

        debug!(path = %path.display(), entries = entries.len(), "ledger loaded");
        Ok(Self {
            path,
            inner: Mutex::new(entries),
        })
    }

    /// Like [`FileLedger::open`], but additionally enforces the chain
    /// invariants on the loaded sequence. A document that decodes but has a
    /// broken chain is reported as corrupt.
    pub fn open_verified(path: impl Into<PathBuf>) -> LedgerResult<Self> {
        let ledger = Self::open(path)?;
        {
            let entries = ledger.inner.lock().map_err(|_| LedgerError::Poisoned)?;
            if let Err(e) = ChainValidator::validate(&entries).ensure_valid() {
                return Err(LedgerError::Corrupted {
                    reason: e.to_string(),
                });
            }
        }
        Ok(ledger)
    }

    /// Path of the persisted document.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Write the full entry sequence to `path`, atomically.
///
/// Temp file in the target directory, write, fsync, rename. Never
/// truncate-then-write in place.
fn persist(path: &Path, entries: &[LedgerEntry]) -> LedgerResult<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&parent)?;

    let encoded = serde_json::to_vec_pretty(entries)
        .map_err(|e| LedgerError::Serialization(e.to_string()))?;

    let mut tmp = NamedTempFile::new_in(&parent)?;
    tmp.write_all(&encoded)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| LedgerError::Io(e.error))?;
    Ok(())
}

impl LedgerWriter for FileLedger {
    fn append(&self, subject: &str, digest: Digest) -> LedgerResult<LedgerEntry> {
        let mut entries = self.inner.lock().map_err(|_| LedgerError::Poisoned)?;
        let entry = next_entry(entries.last(), subject, digest);

        entries.push(entry.clone());
        if let Err(e) = persist(&self.path, &entries) {
            // Disk still holds the prior document; roll memory back to match.
            entries.pop();
            return Err(e);
        }

        debug!(index = entry.index, subject, "ledger entry appended");
        Ok(entry)
    }
}

impl LedgerReader for FileLedger {
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use bpl_types::ChainLink;

    fn digest(data: &[u8]) -> Digest {
        Digest::from_bytes(data)
    }

    #[test]
    fn open_missing_file_creates_empty_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        let ledger = FileLedger::open(&path).unwrap();
        assert_eq!(ledger.len().unwrap(), 0);

        let raw = fs::read_to_string(&path).unwrap();
        let parsed: Vec<LedgerEntry> = serde_json::from_str(&raw).unwrap();
        assert!(parsed.is_empty());
    }

    #[test]
    fn first_append_has_genesis_link() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = FileLedger::open(dir.path().join("ledger.json")).unwrap();
        let d = digest(b"abc123");
        let entry = ledger.append("seq1.fasta", d).unwrap();
        assert_eq!(entry.index, 1);
        assert_eq!(entry.previous_digest, ChainLink::Genesis);
        assert_eq!(entry.digest, d);
    }

    #[test]
    fn append_then_reload_preserves_the_sequence() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");

        let appended: Vec<LedgerEntry> = {
            let ledger = FileLedger::open(&path).unwrap();
            (0..5)
                .map(|i| {
                    ledger
                        .append(&format!("seq{i}.fasta"), digest(format!("c{i}").as_bytes()))
                        .unwrap()
                })
                .collect()
        };

        let reloaded = FileLedger::open(&path).unwrap();
        assert_eq!(reloaded.entries().unwrap(), appended);
        assert!(ChainValidator::validate(&reloaded.entries().unwrap()).is_valid());
    }

    #[test]
    fn malformed_document_fails_with_corrupted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        fs::write(&path, "{ not a ledger").unwrap();
        let err = FileLedger::open(&path).unwrap_err();
        assert!(matches!(err, LedgerError::Corrupted { .. }));
    }

    #[test]
    fn unknown_fields_fail_with_corrupted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        let d = digest(b"x").to_hex();
        fs::write(
            &path,
            format!(
                r#"[{{"index":1,"subject":"a.fasta","digest":"{d}","timestamp":"2026-01-15T10:30:00Z","previous_digest":"GENESIS","injected":"field"}}]"#
            ),
        )
        .unwrap();
        let err = FileLedger::open(&path).unwrap_err();
        assert!(matches!(err, LedgerError::Corrupted { .. }));
    }

    #[test]
    fn open_verified_rejects_a_tampered_chain() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        {
            let ledger = FileLedger::open(&path).unwrap();
            ledger.append("seq1.fasta", digest(b"one")).unwrap();
            ledger.append("seq2.fasta", digest(b"two")).unwrap();
        }

        // Rewrite entry 1's digest on disk without touching entry 2's link.
        let raw = fs::read_to_string(&path).unwrap();
        let mut doc: serde_json::Value = serde_json::from_str(&raw).unwrap();
        doc[0]["digest"] = serde_json::Value::String(digest(b"tampered").to_hex());
        fs::write(&path, serde_json::to_string_pretty(&doc).unwrap()).unwrap();

        // Structural decode still succeeds...
        assert!(FileLedger::open(&path).is_ok());
        // ...but verified load refuses the broken chain.
        let err = FileLedger::open_verified(&path).unwrap_err();
        assert!(matches!(err, LedgerError::Corrupted { .. }));
    }

    #[test]
    fn concurrent_appends_produce_a_valid_chain() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = Arc::new(FileLedger::open(dir.path().join("ledger.json")).unwrap());

        let threads: Vec<_> = (0..8)
            .map(|i| {
                let ledger = Arc::clone(&ledger);
                std::thread::spawn(move || {
                    ledger
                        .append(
                            &format!("seq{i}.fasta"),
                            Digest::from_bytes(format!("t{i}").as_bytes()),
                        )
                        .unwrap()
                })
            })
            .collect();
        for t in threads {
            t.join().unwrap();
        }

        let entries = ledger.entries().unwrap();
        assert_eq!(entries.len(), 8);
        assert!(ChainValidator::validate(&entries).is_valid());

        // The persisted document matches the in-memory state.
        let reloaded = FileLedger::open(ledger.path()).unwrap();
        assert_eq!(reloaded.entries().unwrap(), entries);
    }

    #[test]
    fn timestamps_are_non_decreasing_across_appends() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = FileLedger::open(dir.path().join("ledger.json")).unwrap();
        for i in 0..10 {
            ledger
                .append(&format!("s{i}.fasta"), digest(format!("{i}").as_bytes()))
                .unwrap();
        }
        let entries = ledger.entries().unwrap();
        for pair in entries.windows(2) {
            assert!(pair[1].timestamp >= pair[0].timestamp);
        }
    }
}
