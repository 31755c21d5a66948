//! Request and response bodies for the Bio-Pipeline API.

use bpl_ledger::ValidationReport;
use bpl_types::{Digest, LedgerEntry};
use serde::{Deserialize, Serialize};

use crate::history::HistoryEntry;
use crate::sources::FastaSource;

/// Health check response.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".into(),
            version: env!("CARGO_PKG_VERSION").into(),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct UploadResponse {
    pub filename: String,
    pub digest: Digest,
    pub entry: LedgerEntry,
    pub message: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct AnalysisResponse {
    pub filename: String,
    pub length: u64,
    pub gc_percent: f64,
    pub sequence_preview: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct HashResponse {
    pub filename: String,
    pub digest: Digest,
}

#[derive(Clone, Debug, Serialize)]
pub struct LedgerResponse {
    pub ledger: Vec<LedgerEntry>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct LedgerAddRequest {
    pub subject: String,
    #[serde(default)]
    pub digest: Option<Digest>,
}

/// Result of an on-demand chain audit.
#[derive(Clone, Debug, Serialize)]
pub struct VerifyResponse {
    pub valid: bool,
    pub entry_count: u64,
    pub first_bad_index: Option<u64>,
    pub violations: Vec<bpl_ledger::Violation>,
}

impl From<ValidationReport> for VerifyResponse {
    fn from(report: ValidationReport) -> Self {
        Self {
            valid: report.is_valid(),
            entry_count: report.entry_count,
            first_bad_index: report.first_bad_index(),
            violations: report.violations,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct FastaSourceList {
    pub sources: Vec<FastaSource>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct FetchRequest {
    #[serde(default)]
    pub source_id: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct FetchResponse {
    pub filename: String,
    pub digest: Digest,
    pub entry: LedgerEntry,
    pub source: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct HistoryResponse {
    pub history: Vec<HistoryEntry>,
    pub total: usize,
}
