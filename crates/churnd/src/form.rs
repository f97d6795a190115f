//! Interactive front door: the /ui form surface.
//!
//! The form is described declaratively as 18 field specs built once at
//! startup and never mutated per request; rendering walks the description.
//! Submissions arrive as strings from independent widgets, get coerced into
//! the same payload shape the API door produces, and run through the shared
//! pipeline, so both doors validate and dispatch identically.

use crate::dispatch::Outcome;
use churn_common::{
    FieldError, RecordError, Risk, Verdict, CONTRACTS, GENDERS, INTERNET_ADDON_OPTIONS,
    INTERNET_SERVICES, PAYMENT_METHODS, PHONE_LINE_OPTIONS, YES_NO,
};
use serde::Deserialize;
use serde_json::{Map, Number, Value};

// ============================================================================
// Form Description
// ============================================================================

#[derive(Debug, Clone)]
pub enum Widget {
    Dropdown {
        options: &'static [&'static str],
        default: &'static str,
    },
    Slider {
        min: f64,
        max: f64,
        step: f64,
        default: f64,
    },
    Number {
        default: f64,
    },
}

#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub widget: Widget,
}

/// Stateless description of the 18 form controls.
#[derive(Debug, Clone)]
pub struct FormSpec {
    pub fields: Vec<FieldSpec>,
}

fn dropdown(
    name: &'static str,
    label: &'static str,
    options: &'static [&'static str],
    default: &'static str,
) -> FieldSpec {
    FieldSpec {
        name,
        label,
        widget: Widget::Dropdown { options, default },
    }
}

impl FormSpec {
    pub fn build() -> FormSpec {
        FormSpec {
            fields: vec![
                dropdown("gender", "Gender", GENDERS, "Female"),
                dropdown("Partner", "Has Partner", YES_NO, "No"),
                dropdown("Dependents", "Has Dependents", YES_NO, "No"),
                dropdown("PhoneService", "Phone Service", YES_NO, "Yes"),
                dropdown("MultipleLines", "Multiple Lines", PHONE_LINE_OPTIONS, "No"),
                dropdown(
                    "InternetService",
                    "Internet Service",
                    INTERNET_SERVICES,
                    "Fiber optic",
                ),
                dropdown("OnlineSecurity", "Online Security", INTERNET_ADDON_OPTIONS, "No"),
                dropdown("OnlineBackup", "Online Backup", INTERNET_ADDON_OPTIONS, "No"),
                dropdown(
                    "DeviceProtection",
                    "Device Protection",
                    INTERNET_ADDON_OPTIONS,
                    "No",
                ),
                dropdown("TechSupport", "Tech Support", INTERNET_ADDON_OPTIONS, "No"),
                dropdown("StreamingTV", "Streaming TV", INTERNET_ADDON_OPTIONS, "Yes"),
                dropdown(
                    "StreamingMovies",
                    "Streaming Movies",
                    INTERNET_ADDON_OPTIONS,
                    "Yes",
                ),
                dropdown("Contract", "Contract Type", CONTRACTS, "Month-to-month"),
                dropdown("PaperlessBilling", "Paperless Billing", YES_NO, "Yes"),
                dropdown(
                    "PaymentMethod",
                    "Payment Method",
                    PAYMENT_METHODS,
                    "Electronic check",
                ),
                FieldSpec {
                    name: "tenure",
                    label: "Tenure (months)",
                    widget: Widget::Slider {
                        min: 0.0,
                        max: 100.0,
                        step: 1.0,
                        default: 1.0,
                    },
                },
                FieldSpec {
                    name: "MonthlyCharges",
                    label: "Monthly Charges ($)",
                    widget: Widget::Slider {
                        min: 0.0,
                        max: 200.0,
                        step: 0.1,
                        default: 85.0,
                    },
                },
                FieldSpec {
                    name: "TotalCharges",
                    label: "Total Charges ($)",
                    widget: Widget::Number { default: 85.0 },
                },
            ],
        }
    }

    /// Render the form page. Pure function of the description.
    pub fn render_page(&self) -> String {
        let mut controls = String::new();
        for field in &self.fields {
            controls.push_str(&render_field(field));
        }
        format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<title>Telco Churn Predictor</title>\n\
             <style>{}</style>\n</head>\n<body>\n\
             <h1>Telco Customer Churn Predictor</h1>\n\
             <form method=\"post\" action=\"/ui/predict\">\n{}\
             <button type=\"submit\">Predict Churn Risk</button>\n</form>\n\
             </body>\n</html>\n",
            PAGE_CSS, controls
        )
    }
}

const PAGE_CSS: &str = "body {max-width: 1200px; margin: auto; font-family: sans-serif;}\n\
    label {display: block; margin-top: 12px; font-weight: bold;}\n\
    .output-text {font-size: 18px; font-weight: bold;}\n\
    .prediction-high {color: #dc2626; background-color: #fef2f2; padding: 15px; border-radius: 8px;}\n\
    .prediction-low {color: #16a34a; background-color: #f0fdf4; padding: 15px; border-radius: 8px;}";

fn render_field(field: &FieldSpec) -> String {
    let mut html = format!("<label for=\"{0}\">{1}</label>\n", field.name, field.label);
    match &field.widget {
        Widget::Dropdown { options, default } => {
            html.push_str(&format!("<select name=\"{}\" id=\"{0}\">\n", field.name));
            for option in *options {
                let selected = if option == default { " selected" } else { "" };
                html.push_str(&format!("<option{}>{}</option>\n", selected, option));
            }
            html.push_str("</select>\n");
        }
        Widget::Slider {
            min,
            max,
            step,
            default,
        } => {
            html.push_str(&format!(
                "<input type=\"range\" name=\"{}\" id=\"{0}\" min=\"{}\" max=\"{}\" \
                 step=\"{}\" value=\"{}\">\n",
                field.name, min, max, step, default
            ));
        }
        Widget::Number { default } => {
            html.push_str(&format!(
                "<input type=\"number\" name=\"{}\" id=\"{0}\" min=\"0\" step=\"any\" \
                 value=\"{}\">\n",
                field.name, default
            ));
        }
    }
    html
}

// ============================================================================
// Form Submission
// ============================================================================

/// Raw widget values. Everything arrives as a string over urlencoded form
/// data; numeric coercion happens in `normalize`.
#[derive(Debug, Clone, Deserialize)]
pub struct FormSubmission {
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
    pub tenure: String,
    #[serde(rename = "MonthlyCharges")]
    pub monthly_charges: String,
    #[serde(rename = "TotalCharges")]
    pub total_charges: String,
}

impl FormSubmission {
    /// Coerce widget strings into the same payload shape the API door sends.
    /// Categorical values pass through untouched; tenure becomes an integer
    /// and the charges become reals. The result still goes through the
    /// shared schema validator.
    pub fn normalize(&self) -> Result<Value, RecordError> {
        let mut errors = Vec::new();
        let mut payload = Map::new();

        let categorical = [
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
        ];
        for (name, value) in categorical {
            payload.insert(name.to_string(), Value::String(value.clone()));
        }

        match parse_integer(&self.tenure) {
            Some(n) => {
                payload.insert("tenure".to_string(), Value::Number(Number::from(n)));
            }
            None => errors.push(FieldError {
                field: "tenure".to_string(),
                problem: "expected a whole number of months".to_string(),
            }),
        }

        for (name, raw) in [
            ("MonthlyCharges", &self.monthly_charges),
            ("TotalCharges", &self.total_charges),
        ] {
            match raw.trim().parse::<f64>().ok().and_then(Number::from_f64) {
                Some(n) => {
                    payload.insert(name.to_string(), Value::Number(n));
                }
                None => errors.push(FieldError {
                    field: name.to_string(),
                    problem: "expected a number".to_string(),
                }),
            }
        }

        if errors.is_empty() {
            Ok(Value::Object(payload))
        } else {
            Err(RecordError { fields: errors })
        }
    }
}

/// Sliders may report "12" or "12.0"; both mean twelve months.
fn parse_integer(raw: &str) -> Option<u64> {
    let trimmed = raw.trim();
    if let Ok(n) = trimmed.parse::<u64>() {
        return Some(n);
    }
    match trimmed.parse::<f64>() {
        Ok(f) if f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64 => Some(f as u64),
        _ => None,
    }
}

// ============================================================================
// Styled Output
// ============================================================================

/// Wrap the verdict text in its risk-appropriate styling. The text itself is
/// carried through unchanged; only the framing differs.
pub fn styled_verdict(verdict: &Verdict) -> String {
    match verdict.risk() {
        Risk::Elevated => format!(
            "<div class=\"prediction-high\">\u{26a0}\u{fe0f} {}</div>",
            verdict
        ),
        Risk::Low => format!("<div class=\"prediction-low\">\u{2705} {}</div>", verdict),
    }
}

/// Errors on the interactive surface are displayed as strings inside the
/// risk styling; the surface never sees an unhandled fault.
pub fn styled_error(message: &str) -> String {
    format!(
        "<div class=\"prediction-high\">\u{26a0}\u{fe0f} {}</div>",
        message
    )
}

/// Result page shown after a form submission.
pub fn render_result_page(result_markup: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<title>Telco Churn Predictor</title>\n\
         <style>{}</style>\n</head>\n<body>\n\
         <h1>Prediction Result</h1>\n\
         <div class=\"output-text\">{}</div>\n\
         <p><a href=\"/ui\">Back to form</a></p>\n\
         </body>\n</html>\n",
        PAGE_CSS, result_markup
    )
}
