//! HTTP API for the Bio-Pipeline.
//!
//! Exposes FASTA ingestion (upload and remote fetch), QC analysis, content
//! hashing, and the append-only ingestion ledger (listing, manual append,
//! and on-demand integrity audit) over a small axum router.

pub mod config;
pub mod error;
mod fetch;
pub mod handlers;
pub mod history;
pub mod messages;
pub mod router;
pub mod server;
pub mod sources;
pub mod state;

pub use config::{ConfigError, ServerConfig};
pub use error::ApiError;
pub use history::{AnalysisHistory, HistoryEntry};
pub use server::BplServer;
pub use state::AppState;
