use std::sync::Arc;
use std::time::Duration;

use bpl_ledger::{FileLedger, IngestionRecorder, LedgerQuery};
use bpl_storage::ArtifactStore;

use crate::config::ServerConfig;
use crate::history::AnalysisHistory;

/// Shared application state handed to every handler.
pub struct AppState {
    pub config: ServerConfig,
    pub artifacts: Arc<ArtifactStore>,
    pub ledger: Arc<FileLedger>,
    pub recorder: IngestionRecorder<Arc<FileLedger>, Arc<ArtifactStore>>,
    pub query: LedgerQuery<Arc<FileLedger>>,
    pub history: AnalysisHistory,
    pub http: reqwest::Client,
}

impl AppState {
    /// Build the full service graph from configuration.
    ///
    /// The ledger is loaded with verification: a tampered document is
    /// refused at startup rather than discovered mid-flight.
    pub fn new(config: ServerConfig) -> anyhow::Result<Self> {
        let artifacts = Arc::new(ArtifactStore::new(&config.data_dir));
        artifacts.ensure_layout()?;

        let ledger = Arc::new(FileLedger::open_verified(config.ledger_path())?);
        let recorder = IngestionRecorder::new(Arc::clone(&ledger), Arc::clone(&artifacts));
        let query = LedgerQuery::new(Arc::clone(&ledger));
        let history = AnalysisHistory::open(config.history_path());
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.fetch_timeout_secs))
            .build()?;

        Ok(Self {
            config,
            artifacts,
            ledger,
            recorder,
            query,
            history,
            http,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_builds_and_creates_layout() {
        let dir = tempfile::tempdir().unwrap();
        let config = ServerConfig {
            data_dir: dir.path().to_path_buf(),
            ..Default::default()
        };
        let state = AppState::new(config).unwrap();
        assert!(state.artifacts.uploads_dir().is_dir());
        assert!(state.ledger.path().is_file());
    }

    #[test]
    fn state_refuses_a_corrupted_ledger() {
        let dir = tempfile::tempdir().unwrap();
        let config = ServerConfig {
            data_dir: dir.path().to_path_buf(),
            ..Default::default()
        };
        std::fs::write(config.ledger_path(), "definitely not json").unwrap();
        assert!(AppState::new(config).is_err());
    }
}
