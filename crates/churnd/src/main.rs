//! Churnd - customer churn prediction daemon
//!
//! Serves one model through two front doors: POST /predict for machines,
//! /ui for humans. A failed model load keeps the server up; the health
//! probe stays green and predictions answer with the error shape.

use anyhow::Result;
use churnd::config::ChurndConfig;
use churnd::dispatch::PredictorHandle;
use churnd::inference::ChurnModel;
use churnd::server::{self, AppState};
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    info!("churnd v{} starting", env!("CARGO_PKG_VERSION"));

    let config = ChurndConfig::load();

    let predictor = match ChurnModel::load(Path::new(&config.model_path)) {
        Ok(model) => PredictorHandle::Ready(Arc::new(model)),
        Err(e) => {
            error!("Model load failed: {} - serving without a model", e);
            PredictorHandle::Failed(e.to_string())
        }
    };

    let state = AppState::new(predictor);
    server::run(state, &config.bind_addr).await
}
