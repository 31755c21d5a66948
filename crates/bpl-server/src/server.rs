use std::sync::Arc;

use tokio::net::TcpListener;

use crate::router::build_router;
use crate::state::AppState;

/// Bio-Pipeline HTTP server.
pub struct BplServer {
    state: Arc<AppState>,
}

impl BplServer {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(Arc::clone(&self.state))
    }

    /// Start serving requests.
    pub async fn serve(self) -> std::io::Result<()> {
        let addr = self.state.config.bind_addr;
        let app = build_router(self.state);
        let listener = TcpListener::bind(addr).await?;
        tracing::info!("bio-pipeline server listening on {addr}");
        axum::serve(listener, app).await
    }
}
