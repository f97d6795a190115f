//! Verdict type and display-only risk classification.
//!
//! The core treats the inference output as an arbitrary printable value.
//! The risk classification exists only to pick a visual wrapper on the
//! interactive surface; it never alters the verdict's content.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque inference output, e.g. "Likely to churn".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Verdict(String);

/// Styling class selected by inspecting the verdict text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Risk {
    Elevated,
    Low,
}

impl Verdict {
    pub fn new(text: impl Into<String>) -> Self {
        Verdict(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    /// Substring test for elevated-risk wording. Case-sensitive, matching
    /// the phrases the scoring side emits for at-risk customers.
    pub fn risk(&self) -> Risk {
        if self.0.contains("Will CHURN") || self.0.contains("High Risk") {
            Risk::Elevated
        } else {
            Risk::Low
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_churn_wording_is_elevated_risk() {
        assert_eq!(Verdict::new("Will CHURN within 3 months").risk(), Risk::Elevated);
        assert_eq!(Verdict::new("High Risk customer").risk(), Risk::Elevated);
    }

    #[test]
    fn test_other_wording_is_low_risk() {
        assert_eq!(Verdict::new("Not likely to churn").risk(), Risk::Low);
        // Case-sensitive on purpose: lowercase wording is not flagged.
        assert_eq!(Verdict::new("will churn").risk(), Risk::Low);
        assert_eq!(Verdict::new("").risk(), Risk::Low);
    }

    #[test]
    fn test_classification_does_not_touch_content() {
        let verdict = Verdict::new("Will CHURN");
        let _ = verdict.risk();
        assert_eq!(verdict.as_str(), "Will CHURN");
    }

    #[test]
    fn test_serializes_as_bare_string() {
        let verdict = Verdict::new("Likely to churn");
        assert_eq!(
            serde_json::to_value(&verdict).unwrap(),
            serde_json::json!("Likely to churn")
        );
    }
}
