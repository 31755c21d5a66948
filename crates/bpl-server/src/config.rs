use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Server configuration, loadable from a TOML file.
///
/// Every field has a default; a partial file overrides only what it names.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to.
    pub bind_addr: SocketAddr,
    /// Root of the data directory (uploads, ledger, analysis history).
    pub data_dir: PathBuf,
    /// Timeout for remote FASTA fetches, in seconds.
    pub fetch_timeout_secs: u64,
    /// Upper bound on uploaded request bodies, in bytes.
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8000".parse().unwrap(),
            data_dir: PathBuf::from("storage"),
            fetch_timeout_secs: 20,
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

impl ServerConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }

    /// Path of the persisted ledger document.
    pub fn ledger_path(&self) -> PathBuf {
        self.data_dir.join("ledger.json")
    }

    /// Path of the analysis-history document.
    pub fn history_path(&self) -> PathBuf {
        self.data_dir.join("analysis_history.json")
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = ServerConfig::default();
        assert_eq!(c.bind_addr, "127.0.0.1:8000".parse::<SocketAddr>().unwrap());
        assert_eq!(c.data_dir, PathBuf::from("storage"));
        assert_eq!(c.fetch_timeout_secs, 20);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let c: ServerConfig = toml::from_str("bind_addr = \"0.0.0.0:9000\"").unwrap();
        assert_eq!(c.bind_addr, "0.0.0.0:9000".parse::<SocketAddr>().unwrap());
        assert_eq!(c.fetch_timeout_secs, 20);
    }

    #[test]
    fn derived_paths_live_under_data_dir() {
        let c = ServerConfig::default();
        assert_eq!(c.ledger_path(), PathBuf::from("storage/ledger.json"));
        assert_eq!(
            c.history_path(),
            PathBuf::from("storage/analysis_history.json")
        );
    }
}
