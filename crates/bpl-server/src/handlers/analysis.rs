//! FASTA upload, analysis, remote fetch, and history endpoints.

use std::sync::Arc;

use axum::extract::{Multipart, Path, Query, State};
use axum::response::Json;
use chrono::Utc;
use serde::Deserialize;
use tracing::warn;

use bpl_qc::{parse_fasta, summarize};
use bpl_storage::has_fasta_extension;

use crate::error::ApiError;
use crate::fetch;
use crate::history::HistoryEntry;
use crate::messages::{
    AnalysisResponse, FastaSourceList, FetchRequest, FetchResponse, HistoryResponse,
    UploadResponse,
};
use crate::sources;
use crate::state::AppState;

/// Persist an uploaded FASTA file and record the ingestion in the ledger.
pub async fn upload_fasta(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
    {
        let Some(name) = field.file_name().map(str::to_owned) else {
            continue;
        };
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;
        upload = Some((name, data));
        break;
    }

    let (name, data) =
        upload.ok_or_else(|| ApiError::BadRequest("no file field in upload".into()))?;
    if !has_fasta_extension(&name) {
        return Err(ApiError::BadRequest(
            "only .fa/.fasta files are supported".into(),
        ));
    }

    let stored = state.artifacts.save(&name, &data)?;
    let digest = state.artifacts.digest(&stored)?;
    let entry = state.recorder.record(&stored, Some(digest))?;

    Ok(Json(UploadResponse {
        filename: stored,
        digest,
        entry,
        message: "Upload ingested and ledgered".into(),
    }))
}

/// Run QC analysis on a stored FASTA and record the run in the history.
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<Json<AnalysisResponse>, ApiError> {
    let content = state.artifacts.read_to_string(&filename)?;
    let records = parse_fasta(&content)?;
    let summary = summarize(&records)?;

    // History is a best-effort side channel; the analysis result stands
    // whether or not the record lands.
    match state.artifacts.digest(&filename) {
        Ok(digest) => state.history.append(HistoryEntry {
            filename: filename.clone(),
            length: summary.length,
            gc_percent: summary.gc_percent,
            digest,
            analyzed_at: Utc::now(),
        }),
        Err(e) => warn!(%filename, error = %e, "skipping analysis history record"),
    }

    Ok(Json(AnalysisResponse {
        filename,
        length: summary.length,
        gc_percent: summary.gc_percent,
        sequence_preview: summary.sequence_preview,
    }))
}

/// Curated remote FASTA datasets.
pub async fn fasta_sources() -> Json<FastaSourceList> {
    Json(FastaSourceList {
        sources: sources::predefined(),
    })
}

/// Fetch a FASTA from a remote source and record it in the ledger.
pub async fn fetch_fasta(
    State(state): State<Arc<AppState>>,
    Json(req): Json<FetchRequest>,
) -> Result<Json<FetchResponse>, ApiError> {
    let (url, label) = match &req.source_id {
        Some(id) => {
            let source = sources::find(id)
                .ok_or_else(|| ApiError::NotFound(format!("source {id}")))?;
            (source.url, source.name)
        }
        None => {
            let url = req
                .url
                .clone()
                .filter(|u| !u.is_empty())
                .ok_or_else(|| {
                    ApiError::BadRequest("either source_id or url must be provided".into())
                })?;
            (url.clone(), url)
        }
    };

    let (filename, digest, entry) =
        fetch::fetch_remote_fasta(&state, &url, req.filename.as_deref()).await?;

    Ok(Json(FetchResponse {
        filename,
        digest,
        entry,
        source: label,
    }))
}

#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Recorded analysis runs, optionally filtered by filename.
pub async fn history(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HistoryParams>,
) -> Json<HistoryResponse> {
    let history = state
        .history
        .list(params.filename.as_deref(), params.limit);
    Json(HistoryResponse {
        total: history.len(),
        history,
    })
}

#[derive(Debug, Deserialize)]
pub struct LimitParams {
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Recorded analysis runs for one filename.
pub async fn history_for(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
    Query(params): Query<LimitParams>,
) -> Json<HistoryResponse> {
    let history = state.history.list(Some(&filename), params.limit);
    Json(HistoryResponse {
        total: history.len(),
        history,
    })
}
