//! Remote FASTA retrieval.
//!
//! Download happens before any ledger interaction, so the append lock is
//! never held across network I/O.

use bpl_types::{Digest, LedgerEntry};
use chrono::Utc;
use tracing::warn;

use bpl_storage::has_fasta_extension;

use crate::error::ApiError;
use crate::state::AppState;

/// Download a FASTA, store it, and record the ingestion.
///
/// Returns the stored name, the content digest, and the new ledger entry.
pub(crate) async fn fetch_remote_fasta(
    state: &AppState,
    url: &str,
    filename: Option<&str>,
) -> Result<(String, Digest, LedgerEntry), ApiError> {
    let response = state
        .http
        .get(url)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| {
            warn!(%url, error = %e, "remote fetch failed");
            ApiError::BadRequest("unable to retrieve FASTA from the provided URL".into())
        })?;

    let body = response.text().await.map_err(|e| {
        warn!(%url, error = %e, "remote fetch body unreadable");
        ApiError::BadRequest("unable to retrieve FASTA from the provided URL".into())
    })?;

    if !body.contains('>') {
        return Err(ApiError::BadRequest(
            "remote response does not look like a FASTA file".into(),
        ));
    }

    let name = filename
        .filter(|n| !n.is_empty())
        .map(str::to_owned)
        .unwrap_or_else(|| derive_name(url));
    let name = ensure_fasta_extension(name);

    let stored = state.artifacts.save(&name, body.as_bytes())?;
    let digest = state.artifacts.digest(&stored)?;
    let entry = state.recorder.record(&stored, Some(digest))?;
    Ok((stored, digest, entry))
}

/// Last path segment of the URL, or a timestamped fallback name.
fn derive_name(url: &str) -> String {
    let without_query = url.split(['?', '#']).next().unwrap_or(url);
    let after_scheme = without_query
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(without_query);
    let name = match after_scheme.split_once('/') {
        Some((_host, path)) => path.trim_end_matches('/').rsplit('/').next().unwrap_or(""),
        None => "",
    };
    if name.is_empty() {
        format!("remote_{}.fasta", Utc::now().timestamp())
    } else {
        name.to_owned()
    }
}

fn ensure_fasta_extension(name: String) -> String {
    if has_fasta_extension(&name) {
        name
    } else {
        format!("{name}.fasta")
    }
}
