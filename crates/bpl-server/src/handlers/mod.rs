pub mod analysis;
pub mod hashing;
pub mod ledger;

use axum::response::Json;

use crate::messages::HealthResponse;

/// Heartbeat endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}
