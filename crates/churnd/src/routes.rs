//! HTTP routes for churnd.
//!
//! Three concerns, one router each: the health probe, the prediction API,
//! and the interactive form surface. Both prediction doors call the shared
//! pipeline in `dispatch`; neither carries logic of its own.

use crate::dispatch::{self, Outcome};
use crate::form::{self, FormSubmission};
use crate::server::AppState;
use axum::{
    extract::rejection::JsonRejection,
    extract::State,
    http::StatusCode,
    response::Html,
    routing::{get, post},
    Form, Json, Router,
};
use churn_common::{HealthResponse, PredictResponse};
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

type AppStateArc = Arc<AppState>;

// ============================================================================
// Health Routes
// ============================================================================

pub fn health_routes() -> Router<AppStateArc> {
    Router::new().route("/", get(health_check))
}

/// Liveness probe for fronting infrastructure. Touches nothing: no state,
/// no validation, no collaborator. Answers even when the model failed to
/// load.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

// ============================================================================
// Prediction API Routes
// ============================================================================

pub fn predict_routes() -> Router<AppStateArc> {
    Router::new().route("/predict", post(predict))
}

/// Machine-readable front door.
///
/// Schema errors answer 422, mirroring the validation layer the original
/// service had in front of its handler; inference faults answer 200. Either
/// way the body carries exactly one of `prediction` or `error`, so callers
/// inspect the payload, not the status code.
async fn predict(
    State(state): State<AppStateArc>,
    payload: Result<Json<Value>, JsonRejection>,
) -> (StatusCode, Json<PredictResponse>) {
    // A body that is not JSON at all still answers in the one-of shape.
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(PredictResponse::failure(rejection.body_text())),
            )
        }
    };

    match dispatch::run_pipeline(&state.predictor, &payload) {
        Outcome::Prediction(verdict) => {
            (StatusCode::OK, Json(PredictResponse::success(verdict)))
        }
        Outcome::SchemaError(err) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(PredictResponse::failure(err.to_string())),
        ),
        Outcome::InferenceFault(err) => {
            (StatusCode::OK, Json(PredictResponse::failure(err.to_string())))
        }
    }
}

// ============================================================================
// Interactive UI Routes
// ============================================================================

pub fn ui_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/ui", get(ui_form))
        .route("/ui/predict", post(ui_predict))
}

async fn ui_form(State(state): State<AppStateArc>) -> Html<String> {
    Html(state.form.render_page())
}

/// Human-facing front door. Widget values are normalized into the same
/// payload shape as the API door and run through the same pipeline; the
/// verdict comes back wrapped in its risk styling.
async fn ui_predict(
    State(state): State<AppStateArc>,
    Form(submission): Form<FormSubmission>,
) -> Html<String> {
    info!("Form submission received");

    let markup = match submission.normalize() {
        Ok(payload) => match dispatch::run_pipeline(&state.predictor, &payload) {
            Outcome::Prediction(verdict) => form::styled_verdict(&verdict),
            Outcome::SchemaError(err) => form::styled_error(&err.to_string()),
            Outcome::InferenceFault(err) => form::styled_error(&err.to_string()),
        },
        Err(err) => form::styled_error(&err.to_string()),
    };

    Html(form::render_result_page(&markup))
}
