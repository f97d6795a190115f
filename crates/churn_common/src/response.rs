//! API response shapes.

use crate::verdict::Verdict;
use serde::{Deserialize, Serialize};

/// Response body for the prediction endpoint.
///
/// Serializes to exactly one of `{"prediction": ...}` or `{"error": ...}`,
/// never both, never neither. Every failure path resolves into the error
/// variant; the endpoint itself never surfaces an unhandled fault.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PredictResponse {
    Success { prediction: Verdict },
    Failure { error: String },
}

impl PredictResponse {
    pub fn success(verdict: Verdict) -> Self {
        PredictResponse::Success { prediction: verdict }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        PredictResponse::Failure {
            error: message.into(),
        }
    }
}

/// Liveness payload for `GET /`. Fixed shape; infrastructure depends on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        HealthResponse {
            status: "ok".to_string(),
        }
    }
}
