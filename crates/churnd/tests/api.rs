//! End-to-end tests driving the router through both front doors.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use churn_common::{CustomerRecord, PredictError, Verdict};
use churnd::dispatch::PredictorHandle;
use churnd::inference::Predictor;
use churnd::server::{build_router, AppState};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// Stub collaborator returning a fixed result and recording the record it
/// was handed.
struct StubPredictor {
    result: Result<&'static str, &'static str>,
    seen: Mutex<Vec<CustomerRecord>>,
}

impl StubPredictor {
    fn ok(label: &'static str) -> Arc<StubPredictor> {
        Arc::new(StubPredictor {
            result: Ok(label),
            seen: Mutex::new(Vec::new()),
        })
    }

    fn failing(message: &'static str) -> Arc<StubPredictor> {
        Arc::new(StubPredictor {
            result: Err(message),
            seen: Mutex::new(Vec::new()),
        })
    }
}

impl Predictor for StubPredictor {
    fn predict(&self, record: &CustomerRecord) -> Result<Verdict, PredictError> {
        self.seen.lock().unwrap().push(record.clone());
        match self.result {
            Ok(label) => Ok(Verdict::new(label)),
            Err(message) => Err(PredictError::Scoring(message.to_string())),
        }
    }
}

fn app_with(predictor: Arc<StubPredictor>) -> Router {
    build_router(Arc::new(AppState::new(PredictorHandle::Ready(predictor))))
}

fn app_without_model() -> Router {
    build_router(Arc::new(AppState::new(PredictorHandle::Failed(
        "model artifact not found at /var/lib/churnd/model.json".to_string(),
    ))))
}

fn example_payload() -> Value {
    json!({
        "gender": "Female", "Partner": "No", "Dependents": "No",
        "PhoneService": "Yes", "MultipleLines": "No",
        "InternetService": "Fiber optic", "OnlineSecurity": "No",
        "OnlineBackup": "No", "DeviceProtection": "No", "TechSupport": "No",
        "StreamingTV": "Yes", "StreamingMovies": "Yes",
        "Contract": "Month-to-month", "PaperlessBilling": "Yes",
        "PaymentMethod": "Electronic check",
        "tenure": 1, "MonthlyCharges": 85.0, "TotalCharges": 85.0
    })
}

fn json_request(payload: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/predict")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap()
}

/// Urlencoded equivalent of `example_payload`, as the form widgets send it.
fn example_form_body() -> String {
    [
        ("gender", "Female"),
        ("Partner", "No"),
        ("Dependents", "No"),
        ("PhoneService", "Yes"),
        ("MultipleLines", "No"),
        ("InternetService", "Fiber optic"),
        ("OnlineSecurity", "No"),
        ("OnlineBackup", "No"),
        ("DeviceProtection", "No"),
        ("TechSupport", "No"),
        ("StreamingTV", "Yes"),
        ("StreamingMovies", "Yes"),
        ("Contract", "Month-to-month"),
        ("PaperlessBilling", "Yes"),
        ("PaymentMethod", "Electronic check"),
        ("tenure", "1"),
        ("MonthlyCharges", "85.0"),
        ("TotalCharges", "85.0"),
    ]
    .iter()
    .map(|(k, v)| format!("{}={}", k, v.replace(' ', "+")))
    .collect::<Vec<_>>()
    .join("&")
}

fn form_request(body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/ui/predict")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn assert_exactly_one_of(body: &Value, keys: [&str; 2]) {
    let obj = body.as_object().expect("response body must be an object");
    let present: Vec<&&str> = keys.iter().filter(|k| obj.contains_key(**k)).collect();
    assert_eq!(present.len(), 1, "expected exactly one of {:?} in {}", keys, body);
    assert_eq!(obj.len(), 1, "unexpected extra keys in {}", body);
}

// ============================================================================
// Health Probe
// ============================================================================

#[tokio::test]
async fn test_health_is_ok() {
    let response = app_with(StubPredictor::ok("Not likely to churn"))
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"status": "ok"}));
}

#[tokio::test]
async fn test_health_is_ok_without_model() {
    let response = app_without_model()
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"status": "ok"}));
}

// ============================================================================
// Prediction API
// ============================================================================

#[tokio::test]
async fn test_predict_success_shape() {
    let response = app_with(StubPredictor::ok("Not likely to churn"))
        .oneshot(json_request(&example_payload()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body, json!({"prediction": "Not likely to churn"}));
    assert_exactly_one_of(&body, ["prediction", "error"]);
}

#[tokio::test]
async fn test_example_record_dispatched_unchanged() {
    let stub = StubPredictor::ok("Likely to churn");
    let response = app_with(stub.clone())
        .oneshot(json_request(&example_payload()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let seen = stub.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    let record = &seen[0];
    assert_eq!(record.gender, "Female");
    assert_eq!(record.internet_service, "Fiber optic");
    assert_eq!(record.payment_method, "Electronic check");
    assert_eq!(record.tenure, 1);
    assert_eq!(record.monthly_charges, 85.0);
    assert_eq!(record.total_charges, 85.0);
}

#[tokio::test]
async fn test_inference_fault_becomes_error_body() {
    let response = app_with(StubPredictor::failing("scoring fault"))
        .oneshot(json_request(&example_payload()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_exactly_one_of(&body, ["prediction", "error"]);
    let message = body["error"].as_str().unwrap();
    assert!(!message.is_empty());
    assert!(message.contains("scoring fault"));
}

#[tokio::test]
async fn test_missing_model_becomes_error_body() {
    let response = app_without_model()
        .oneshot(json_request(&example_payload()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_exactly_one_of(&body, ["prediction", "error"]);
    assert!(body["error"].as_str().unwrap().contains("not loaded"));
}

#[tokio::test]
async fn test_schema_error_names_every_bad_field() {
    let mut payload = example_payload();
    payload["gender"] = json!("Other");
    payload.as_object_mut().unwrap().remove("Contract");

    let stub = StubPredictor::ok("Likely to churn");
    let response = app_with(stub.clone()).oneshot(json_request(&payload)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = body_json(response).await;
    assert_exactly_one_of(&body, ["prediction", "error"]);
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("gender"));
    assert!(message.contains("Contract"));

    // Invalid payloads never reach the collaborator.
    assert!(stub.seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_malformed_json_body_keeps_the_error_shape() {
    let stub = StubPredictor::ok("Likely to churn");
    let request = Request::builder()
        .method("POST")
        .uri("/predict")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app_with(stub.clone()).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = body_json(response).await;
    assert_exactly_one_of(&body, ["prediction", "error"]);
    assert!(!body["error"].as_str().unwrap().is_empty());
    assert!(stub.seen.lock().unwrap().is_empty());
}

// ============================================================================
// Interactive Surface
// ============================================================================

#[tokio::test]
async fn test_ui_serves_the_form() {
    let response = app_with(StubPredictor::ok("Not likely to churn"))
        .oneshot(Request::get("/ui").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let page = body_string(response).await;
    assert!(page.contains("name=\"PaymentMethod\""));
    assert!(page.contains("name=\"TotalCharges\""));
}

#[tokio::test]
async fn test_form_submission_returns_styled_verdict() {
    let response = app_with(StubPredictor::ok("Not likely to churn"))
        .oneshot(form_request(example_form_body()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let page = body_string(response).await;
    assert!(page.contains("prediction-low"));
    assert!(page.contains("Not likely to churn"));
}

#[tokio::test]
async fn test_form_submission_risk_verdict_gets_risk_styling() {
    let response = app_with(StubPredictor::ok("Will CHURN - High Risk"))
        .oneshot(form_request(example_form_body()))
        .await
        .unwrap();
    let page = body_string(response).await;
    assert!(page.contains("prediction-high"));
    assert!(page.contains("Will CHURN - High Risk"));
}

#[tokio::test]
async fn test_form_inference_fault_is_displayed_not_raised() {
    let response = app_with(StubPredictor::failing("scoring fault"))
        .oneshot(form_request(example_form_body()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let page = body_string(response).await;
    assert!(page.contains("scoring fault"));
}

#[tokio::test]
async fn test_both_doors_hand_identical_records_to_the_collaborator() {
    let stub = StubPredictor::ok("Likely to churn");

    let app = app_with(stub.clone());
    app.clone()
        .oneshot(json_request(&example_payload()))
        .await
        .unwrap();
    app.oneshot(form_request(example_form_body())).await.unwrap();

    let seen = stub.seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0], seen[1]);
}
