//! Inference collaborator.
//!
//! The serving core consumes inference through the `Predictor` trait and
//! assumes nothing about what sits behind it. `ChurnModel` is the shipped
//! implementation: a linear scorer over features derived from the customer
//! record, loaded from a JSON artifact produced by the training pipeline.

use churn_common::{CustomerRecord, PredictError, Verdict};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Opaque inference operation consumed by the dispatcher.
///
/// Implementations must be safe to share read-only across concurrent
/// requests; the core never mutates or caches through this trait.
pub trait Predictor: Send + Sync {
    fn predict(&self, record: &CustomerRecord) -> Result<Verdict, PredictError>;
}

// ============================================================================
// Model Artifact
// ============================================================================

/// Serialized model produced by training: logistic scorer weights keyed by
/// "Field=value" for categorical features plus per-field numeric weights.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelArtifact {
    #[serde(default)]
    pub bias: f64,

    /// Probability above which the customer is predicted to churn.
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    #[serde(default = "default_churn_label")]
    pub churn_label: String,

    #[serde(default = "default_retain_label")]
    pub retain_label: String,

    pub categorical_weights: HashMap<String, f64>,

    #[serde(default)]
    pub numeric_weights: HashMap<String, f64>,
}

fn default_threshold() -> f64 {
    0.5
}

fn default_churn_label() -> String {
    "Will CHURN - High Risk".to_string()
}

fn default_retain_label() -> String {
    "Not likely to churn".to_string()
}

// ============================================================================
// Churn Model
// ============================================================================

#[derive(Debug)]
pub struct ChurnModel {
    artifact: ModelArtifact,
}

impl ChurnModel {
    /// Load the model artifact from disk.
    pub fn load(path: &Path) -> Result<ChurnModel, PredictError> {
        let contents = fs::read_to_string(path)
            .map_err(|_| PredictError::ArtifactMissing(path.display().to_string()))?;
        let artifact: ModelArtifact = serde_json::from_str(&contents)
            .map_err(|e| PredictError::ArtifactInvalid(e.to_string()))?;

        info!(
            "Loaded model artifact from {} ({} categorical weights, threshold {})",
            path.display(),
            artifact.categorical_weights.len(),
            artifact.threshold
        );
        Ok(ChurnModel { artifact })
    }

    pub fn from_artifact(artifact: ModelArtifact) -> ChurnModel {
        ChurnModel { artifact }
    }

    /// Linear score over derived features. Every categorical value must have
    /// a weight in the artifact; a missing one means the artifact and the
    /// schema disagree, which is a collaborator fault, not a caller error.
    fn score(&self, record: &CustomerRecord) -> Result<f64, PredictError> {
        let mut score = self.artifact.bias;

        for (field, value) in record.categorical_values() {
            let key = format!("{}={}", field, value);
            let weight = self
                .artifact
                .categorical_weights
                .get(&key)
                .ok_or_else(|| PredictError::Feature(format!("no weight for {}", key)))?;
            score += weight;
        }

        let numeric = [
            ("tenure", record.tenure as f64),
            ("MonthlyCharges", record.monthly_charges),
            ("TotalCharges", record.total_charges),
        ];
        for (field, value) in numeric {
            if let Some(weight) = self.artifact.numeric_weights.get(field) {
                score += weight * value;
            }
        }

        if !score.is_finite() {
            return Err(PredictError::Scoring(format!(
                "non-finite score for record (bias {})",
                self.artifact.bias
            )));
        }
        Ok(score)
    }
}

impl Predictor for ChurnModel {
    fn predict(&self, record: &CustomerRecord) -> Result<Verdict, PredictError> {
        let score = self.score(record)?;
        let probability = 1.0 / (1.0 + (-score).exp());
        debug!("Scored record: {:.4} -> p={:.4}", score, probability);

        let label = if probability >= self.artifact.threshold {
            &self.artifact.churn_label
        } else {
            &self.artifact.retain_label
        };
        Ok(Verdict::new(label.clone()))
    }
}
