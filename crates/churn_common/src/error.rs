//! Inference fault taxonomy.
//!
//! Any failure raised by the inference collaborator is converted into one of
//! these at the dispatch boundary and rendered into the error response shape.
//! The message text is what callers see.

/// Faults the inference collaborator can raise.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PredictError {
    #[error("model artifact not found at {0}")]
    ArtifactMissing(String),

    #[error("model artifact is invalid: {0}")]
    ArtifactInvalid(String),

    #[error("feature derivation failed: {0}")]
    Feature(String),

    #[error("model scoring failed: {0}")]
    Scoring(String),

    #[error("model is not loaded: {0}")]
    Unavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_non_empty_and_specific() {
        let err = PredictError::ArtifactMissing("/var/lib/churnd/model.json".to_string());
        assert!(err.to_string().contains("/var/lib/churnd/model.json"));

        let err = PredictError::Feature("no weight for Contract=Weekly".to_string());
        assert!(err.to_string().contains("Contract=Weekly"));
    }
}
