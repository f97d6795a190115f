//! HTTP server for churnd

use crate::dispatch::PredictorHandle;
use crate::form::FormSpec;
use crate::routes;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Application state shared across handlers. Read-only after startup; no
/// per-request coordination is needed.
pub struct AppState {
    pub predictor: PredictorHandle,
    pub form: FormSpec,
}

impl AppState {
    pub fn new(predictor: PredictorHandle) -> Self {
        Self {
            predictor,
            form: FormSpec::build(),
        }
    }
}

/// Assemble the full router. Split out from `run` so tests can drive it
/// without binding a socket.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(routes::health_routes())
        .merge(routes::predict_routes())
        .merge(routes::ui_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Run the HTTP server.
pub async fn run(state: AppState, bind_addr: &str) -> Result<()> {
    let app = build_router(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!("Listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
