use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use bpl_ledger::LedgerError;
use bpl_qc::QcError;
use bpl_storage::StorageError;
use serde_json::json;
use thiserror::Error;

/// Errors surfaced to API clients.
///
/// Client mistakes map to 4xx; a corrupted ledger or failing disk maps to
/// 500 and is logged, but never crashes the process.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

impl From<LedgerError> for ApiError {
    fn from(e: LedgerError) -> Self {
        match e {
            LedgerError::ArtifactNotFound(name) => ApiError::NotFound(name),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::NotFound(name) => ApiError::NotFound(name),
            StorageError::InvalidName(name) => {
                ApiError::BadRequest(format!("invalid artifact name: {name:?}"))
            }
            StorageError::Io(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<QcError> for ApiError {
    fn from(e: QcError) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}
