//! Customer record schema and validation.
//!
//! Defines the 18-field record shape consumed by inference and enforces it
//! before any inference call. Validation is total and declarative: field
//! presence and domain membership are checked independently for every field,
//! so the caller sees every problem in one response instead of the first one.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

// ============================================================================
// Field Domains
// ============================================================================

pub const YES_NO: &[&str] = &["Yes", "No"];
pub const GENDERS: &[&str] = &["Male", "Female"];
pub const PHONE_LINE_OPTIONS: &[&str] = &["Yes", "No", "No phone service"];
pub const INTERNET_SERVICES: &[&str] = &["DSL", "Fiber optic", "No"];
pub const INTERNET_ADDON_OPTIONS: &[&str] = &["Yes", "No", "No internet service"];
pub const CONTRACTS: &[&str] = &["Month-to-month", "One year", "Two year"];
pub const PAYMENT_METHODS: &[&str] = &[
    "Electronic check",
    "Mailed check",
    "Bank transfer (automatic)",
    "Credit card (automatic)",
];

/// Categorical fields in canonical order, each with its closed value set.
pub const CATEGORICAL_DOMAINS: &[(&str, &[&str])] = &[
    ("gender", GENDERS),
    ("Partner", YES_NO),
    ("Dependents", YES_NO),
    ("PhoneService", YES_NO),
    ("MultipleLines", PHONE_LINE_OPTIONS),
    ("InternetService", INTERNET_SERVICES),
    ("OnlineSecurity", INTERNET_ADDON_OPTIONS),
    ("OnlineBackup", INTERNET_ADDON_OPTIONS),
    ("DeviceProtection", INTERNET_ADDON_OPTIONS),
    ("TechSupport", INTERNET_ADDON_OPTIONS),
    ("StreamingTV", INTERNET_ADDON_OPTIONS),
    ("StreamingMovies", INTERNET_ADDON_OPTIONS),
    ("Contract", CONTRACTS),
    ("PaperlessBilling", YES_NO),
    ("PaymentMethod", PAYMENT_METHODS),
];

/// Numeric fields in canonical order.
pub const NUMERIC_FIELDS: &[&str] = &["tenure", "MonthlyCharges", "TotalCharges"];

// ============================================================================
// Customer Record
// ============================================================================

/// The canonical validated input to inference.
///
/// Field names on the wire match the upstream dataset exactly. Cross-field
/// consistency (e.g. MultipleLines = "No phone service" implying
/// PhoneService = "No") is an external constraint and is not checked here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub gender: String,
    #[serde(rename = "Partner")]
    pub partner: String,
    #[serde(rename = "Dependents")]
    pub dependents: String,
    #[serde(rename = "PhoneService")]
    pub phone_service: String,
    #[serde(rename = "MultipleLines")]
    pub multiple_lines: String,
    #[serde(rename = "InternetService")]
    pub internet_service: String,
    #[serde(rename = "OnlineSecurity")]
    pub online_security: String,
    #[serde(rename = "OnlineBackup")]
    pub online_backup: String,
    #[serde(rename = "DeviceProtection")]
    pub device_protection: String,
    #[serde(rename = "TechSupport")]
    pub tech_support: String,
    #[serde(rename = "StreamingTV")]
    pub streaming_tv: String,
    #[serde(rename = "StreamingMovies")]
    pub streaming_movies: String,
    #[serde(rename = "Contract")]
    pub contract: String,
    #[serde(rename = "PaperlessBilling")]
    pub paperless_billing: String,
    #[serde(rename = "PaymentMethod")]
    pub payment_method: String,
    pub tenure: u32,
    #[serde(rename = "MonthlyCharges")]
    pub monthly_charges: f64,
    #[serde(rename = "TotalCharges")]
    pub total_charges: f64,
}

impl CustomerRecord {
    /// Validate an untyped payload into a well-formed record.
    ///
    /// Every field is checked independently; the error carries one entry per
    /// offending field with the expected domain spelled out.
    pub fn from_value(value: &Value) -> Result<CustomerRecord, RecordError> {
        let obj = match value.as_object() {
            Some(obj) => obj,
            None => {
                return Err(RecordError::single(
                    "payload",
                    "expected a JSON object with the 18 customer fields",
                ))
            }
        };

        let mut errors = Vec::new();

        for (field, domain) in CATEGORICAL_DOMAINS {
            match obj.get(*field) {
                None => errors.push(FieldError::missing(field)),
                Some(Value::String(s)) if domain.contains(&s.as_str()) => {}
                Some(_) => errors.push(FieldError::out_of_domain(field, domain)),
            }
        }

        let tenure = match obj.get("tenure") {
            None => {
                errors.push(FieldError::missing("tenure"));
                None
            }
            Some(v) => match as_non_negative_int(v) {
                Some(n) => Some(n),
                None => {
                    errors.push(field_err_int("tenure"));
                    None
                }
            },
        };

        let mut charges = [0.0f64; 2];
        for (i, field) in ["MonthlyCharges", "TotalCharges"].iter().enumerate() {
            match obj.get(*field) {
                None => errors.push(FieldError::missing(field)),
                Some(v) => match as_non_negative_real(v) {
                    Some(x) => charges[i] = x,
                    None => errors.push(field_err_real(field)),
                },
            }
        }

        if !errors.is_empty() {
            return Err(RecordError { fields: errors });
        }

        let get = |field: &str| -> String {
            obj.get(field)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };

        Ok(CustomerRecord {
            gender: get("gender"),
            partner: get("Partner"),
            dependents: get("Dependents"),
            phone_service: get("PhoneService"),
            multiple_lines: get("MultipleLines"),
            internet_service: get("InternetService"),
            online_security: get("OnlineSecurity"),
            online_backup: get("OnlineBackup"),
            device_protection: get("DeviceProtection"),
            tech_support: get("TechSupport"),
            streaming_tv: get("StreamingTV"),
            streaming_movies: get("StreamingMovies"),
            contract: get("Contract"),
            paperless_billing: get("PaperlessBilling"),
            payment_method: get("PaymentMethod"),
            tenure: tenure.unwrap_or_default(),
            monthly_charges: charges[0],
            total_charges: charges[1],
        })
    }

    /// Categorical field values in canonical order, paired with field names.
    /// Used by feature derivation downstream.
    pub fn categorical_values(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("gender", &self.gender),
            ("Partner", &self.partner),
            ("Dependents", &self.dependents),
            ("PhoneService", &self.phone_service),
            ("MultipleLines", &self.multiple_lines),
            ("InternetService", &self.internet_service),
            ("OnlineSecurity", &self.online_security),
            ("OnlineBackup", &self.online_backup),
            ("DeviceProtection", &self.device_protection),
            ("TechSupport", &self.tech_support),
            ("StreamingTV", &self.streaming_tv),
            ("StreamingMovies", &self.streaming_movies),
            ("Contract", &self.contract),
            ("PaperlessBilling", &self.paperless_billing),
            ("PaymentMethod", &self.payment_method),
        ]
    }
}

/// Accept any JSON number holding a non-negative integral value.
fn as_non_negative_int(v: &Value) -> Option<u32> {
    if let Some(n) = v.as_u64() {
        return u32::try_from(n).ok();
    }
    // Tolerate 5.0 for 5, as the original validation layer did.
    match v.as_f64() {
        Some(f) if f >= 0.0 && f.fract() == 0.0 && f <= u32::MAX as f64 => Some(f as u32),
        _ => None,
    }
}

fn as_non_negative_real(v: &Value) -> Option<f64> {
    match v.as_f64() {
        Some(f) if f.is_finite() && f >= 0.0 => Some(f),
        _ => None,
    }
}

fn field_err_int(field: &str) -> FieldError {
    FieldError {
        field: field.to_string(),
        problem: "expected a non-negative integer".to_string(),
    }
}

fn field_err_real(field: &str) -> FieldError {
    FieldError {
        field: field.to_string(),
        problem: "expected a non-negative number".to_string(),
    }
}

// ============================================================================
// Validation Errors
// ============================================================================

/// One offending field with the expected domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[error("{field}: {problem}")]
pub struct FieldError {
    pub field: String,
    pub problem: String,
}

impl FieldError {
    pub fn missing(field: &str) -> Self {
        FieldError {
            field: field.to_string(),
            problem: "field is required".to_string(),
        }
    }

    pub fn out_of_domain(field: &str, domain: &[&str]) -> Self {
        FieldError {
            field: field.to_string(),
            problem: format!("expected one of: {}", domain.join(", ")),
        }
    }
}

/// Structured validation failure listing every offending field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordError {
    pub fields: Vec<FieldError>,
}

impl RecordError {
    pub fn single(field: &str, problem: &str) -> Self {
        RecordError {
            fields: vec![FieldError {
                field: field.to_string(),
                problem: problem.to_string(),
            }],
        }
    }
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.fields.iter().map(|e| e.to_string()).collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for RecordError {}
