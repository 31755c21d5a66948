//! Best-effort analysis history.
//!
//! A side channel of the analysis endpoint, deliberately kept out of the
//! ledger core: a failed history write is logged and swallowed, while the
//! ledger's own append is never best-effort. Persisted as a JSON array with
//! the same atomic-rename discipline as the ledger document.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use bpl_types::Digest;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::warn;

/// One recorded analysis run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub filename: String,
    pub length: u64,
    pub gc_percent: f64,
    pub digest: Digest,
    pub analyzed_at: DateTime<Utc>,
}

/// Append-mostly store for analysis runs.
pub struct AnalysisHistory {
    path: PathBuf,
    inner: Mutex<Vec<HistoryEntry>>,
}

impl AnalysisHistory {
    /// Open the history document at `path`.
    ///
    /// Unlike the ledger, an unreadable history is not fatal: it is logged
    /// and replaced with an empty one on the next successful write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "discarding unreadable analysis history");
                    Vec::new()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "cannot read analysis history");
                Vec::new()
            }
        };
        Self {
            path,
            inner: Mutex::new(entries),
        }
    }

    /// Record one analysis run, best-effort.
    pub fn append(&self, entry: HistoryEntry) {
        let Ok(mut entries) = self.inner.lock() else {
            warn!("analysis history lock poisoned; dropping record");
            return;
        };
        entries.push(entry);
        if let Err(e) = persist(&self.path, &entries) {
            // Keep memory and disk in agreement.
            entries.pop();
            warn!(error = %e, "failed to persist analysis history");
        }
    }

    /// Recorded runs, newest first, optionally filtered and limited.
    pub fn list(&self, filename: Option<&str>, limit: Option<usize>) -> Vec<HistoryEntry> {
        let Ok(entries) = self.inner.lock() else {
            return Vec::new();
        };
        let filtered = entries
            .iter()
            .rev()
            .filter(|e| filename.map_or(true, |f| e.filename == f))
            .cloned();
        match limit {
            Some(n) => filtered.take(n).collect(),
            None => filtered.collect(),
        }
    }
}

fn persist(path: &Path, entries: &[HistoryEntry]) -> io::Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&parent)?;
    let encoded = serde_json::to_vec_pretty(entries).map_err(io::Error::other)?;
    let mut tmp = NamedTempFile::new_in(&parent)?;
    tmp.write_all(&encoded)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
