use std::fs;
use std::path::{Path, PathBuf};

use bpl_crypto::ContentHasher;
use bpl_ledger::{ArtifactDigests, LedgerError, LedgerResult};
use bpl_types::Digest;
use tracing::debug;

use crate::error::{StorageError, StorageResult};

/// Filesystem-backed artifact store rooted at a data directory.
///
/// All artifacts live flat under `<root>/uploads/`. Names are sanitized
/// before any path is built, so a stored artifact can never escape the
/// upload directory.
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory that holds the stored artifacts.
    pub fn uploads_dir(&self) -> PathBuf {
        self.root.join("uploads")
    }

    /// Create the storage layout if it does not exist yet.
    pub fn ensure_layout(&self) -> StorageResult<()> {
        fs::create_dir_all(self.uploads_dir())?;
        Ok(())
    }

    /// Strip traversal components and path separators from a file name.
    pub fn sanitize(name: &str) -> String {
        name.replace("..", "")
            .replace(['/', '\\'], "_")
    }

    /// Absolute path for an artifact name, after sanitization.
    pub fn artifact_path(&self, name: &str) -> StorageResult<PathBuf> {
        let sanitized = Self::sanitize(name);
        if sanitized.is_empty() || sanitized == "." {
            return Err(StorageError::InvalidName(name.to_owned()));
        }
        Ok(self.uploads_dir().join(sanitized))
    }

    /// Store an artifact and return its stored (sanitized) name.
    pub fn save(&self, name: &str, bytes: &[u8]) -> StorageResult<String> {
        self.ensure_layout()?;
        let path = self.artifact_path(name)?;
        fs::write(&path, bytes)?;
        let stored = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| Self::sanitize(name));
        debug!(name = %stored, bytes = bytes.len(), "artifact stored");
        Ok(stored)
    }

    pub fn exists(&self, name: &str) -> bool {
        self.artifact_path(name)
            .map(|p| p.is_file())
            .unwrap_or(false)
    }

    /// Read a stored artifact as UTF-8 text.
    pub fn read_to_string(&self, name: &str) -> StorageResult<String> {
        let path = self.artifact_path(name)?;
        if !path.is_file() {
            return Err(StorageError::NotFound(name.to_owned()));
        }
        Ok(fs::read_to_string(&path)?)
    }

    /// Streaming content digest of a stored artifact.
    pub fn digest(&self, name: &str) -> StorageResult<Digest> {
        let path = self.artifact_path(name)?;
        if !path.is_file() {
            return Err(StorageError::NotFound(name.to_owned()));
        }
        Ok(ContentHasher::digest_file(&path)?)
    }
}

impl ArtifactDigests for ArtifactStore {
    fn digest_of(&self, subject: &str) -> LedgerResult<Digest> {
        self.digest(subject).map_err(|e| match e {
            StorageError::NotFound(name) | StorageError::InvalidName(name) => {
                LedgerError::ArtifactNotFound(name)
            }
            StorageError::Io(e) => LedgerError::Io(e),
        })
    }
}

/// Whether a file name carries a recognized FASTA extension.
pub fn has_fasta_extension(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    lower.ends_with(".fa") || lower.ends_with(".fasta")
}
