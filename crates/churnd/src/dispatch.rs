//! Shared request pipeline: validate, dispatch, shape.
//!
//! Both front doors funnel through `run_pipeline`, which is the single point
//! of contact with the inference collaborator. Collaborator faults are
//! converted to recoverable outcomes here and never propagate further.
//!
//! There is no timeout around the inference call: if the collaborator blocks,
//! the request blocks with it. Known gap, kept deliberately for this
//! single-prediction workload.

use crate::inference::Predictor;
use churn_common::{CustomerRecord, PredictError, PredictResponse, RecordError, Verdict};
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info};

/// The collaborator as held by the server: loaded, or failed with a reason.
/// A failed load keeps the server (and its health probe) up; predictions
/// resolve into the error shape instead.
#[derive(Clone)]
pub enum PredictorHandle {
    Ready(Arc<dyn Predictor>),
    Failed(String),
}

/// Result of one trip through the pipeline, still carrying enough structure
/// for each front door to shape its own representation.
#[derive(Debug)]
pub enum Outcome {
    Prediction(Verdict),
    SchemaError(RecordError),
    InferenceFault(PredictError),
}

impl Outcome {
    /// Collapse into the API body shape: exactly one of prediction or error.
    pub fn into_body(self) -> PredictResponse {
        match self {
            Outcome::Prediction(verdict) => PredictResponse::success(verdict),
            Outcome::SchemaError(err) => PredictResponse::failure(err.to_string()),
            Outcome::InferenceFault(err) => PredictResponse::failure(err.to_string()),
        }
    }
}

/// Validate an untyped payload and dispatch it. Used as-is by the API door;
/// the form door calls it after normalizing widget values into the same
/// payload shape, so both doors produce identical records for equal inputs.
pub fn run_pipeline(predictor: &PredictorHandle, payload: &Value) -> Outcome {
    let record = match CustomerRecord::from_value(payload) {
        Ok(record) => record,
        Err(err) => {
            info!("Rejected payload: {}", err);
            return Outcome::SchemaError(err);
        }
    };
    dispatch(predictor, &record)
}

/// Single call-through to the collaborator. No caching, no retries, no
/// mutation of the record.
pub fn dispatch(predictor: &PredictorHandle, record: &CustomerRecord) -> Outcome {
    let predictor = match predictor {
        PredictorHandle::Ready(p) => p.as_ref(),
        PredictorHandle::Failed(reason) => {
            error!("Prediction requested but model is not loaded: {}", reason);
            return Outcome::InferenceFault(PredictError::Unavailable(reason.clone()));
        }
    };

    match predictor.predict(record) {
        Ok(verdict) => {
            info!("Prediction: {}", verdict);
            Outcome::Prediction(verdict)
        }
        Err(err) => {
            error!("Inference fault: {}", err);
            Outcome::InferenceFault(err)
        }
    }
}
