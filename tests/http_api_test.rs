use std::sync::Arc;

use aq10_screening::adapters::http::{router, AppState};
use aq10_screening::{LogisticModel, ModelArtifact, ScreeningEngine};
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

/// Each scoring answer adds 1.0 to the logit; the decision crosses zero at six.
const MODEL_JSON: &str = r#"{
    "model_type": "LogisticRegression",
    "coef": [[1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0]],
    "intercept": [-5.5],
    "classes": [0, 1],
    "feature_names_in": ["A1_Score", "A2_Score", "A3_Score", "A4_Score", "A5_Score",
                         "A6_Score", "A7_Score", "A8_Score", "A9_Score", "A10_Score"]
}"#;

fn loaded_app() -> Router {
    let artifact = ModelArtifact::from_json_str(MODEL_JSON).unwrap();
    let model = LogisticModel::from_artifact(artifact).unwrap();
    let state = AppState::new(Some(ScreeningEngine::new(Arc::new(model))));
    router(state, &[])
}

fn unloaded_app() -> Router {
    router(AppState::new(None), &[])
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/predict")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_home_reports_endpoints() {
    let (status, body) = send(loaded_app(), get("/")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "status": "running",
            "model_loaded": true,
            "endpoints": {
                "predict": "/predict (POST)",
                "health": "/health (GET)"
            }
        })
    );
}

#[tokio::test]
async fn test_health_with_and_without_model() {
    let (status, body) = send(loaded_app(), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "healthy", "model_loaded": true}));

    let (status, body) = send(unloaded_app(), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "healthy", "model_loaded": false}));

    let (_, body) = send(unloaded_app(), get("/")).await;
    assert_eq!(body["model_loaded"], json!(false));
}

#[tokio::test]
async fn test_predict_high_score() {
    let request = post_json(json!({
        "responses": {
            "q1": "definitely-agree",
            "q2": "definitely-disagree",
            "q3": "slightly-disagree",
            "q4": "slightly-disagree",
            "q5": "definitely-disagree",
            "q6": "definitely-disagree",
            "q7": "slightly-agree",
            "q8": "definitely-agree",
            "q9": "slightly-disagree",
            "q10": "definitely-agree"
        }
    }));

    let (status, body) = send(loaded_app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["aq10_score"], json!(10));
    assert_eq!(body["model_prediction"], json!(1));
    assert_eq!(body["feature_vector"], json!([1, 1, 1, 1, 1, 1, 1, 1, 1, 1]));

    let autism = body["model_probabilities"]["autism"].as_f64().unwrap();
    let no_autism = body["model_probabilities"]["no_autism"].as_f64().unwrap();
    assert!(autism > 0.98);
    assert!((autism + no_autism - 1.0).abs() < 1e-9);

    let interpretation = &body["interpretation"];
    assert_eq!(interpretation["aq10_interpretation"], json!("High likelihood"));
    assert_eq!(
        interpretation["aq10_threshold"],
        json!("6 or above suggests referral for assessment")
    );
    assert_eq!(interpretation["model_interpretation"], json!("Positive screening"));
    assert_eq!(interpretation["confidence"], json!("98.9%"));
    assert_eq!(interpretation["agreement"], json!("Results agree"));
}

#[tokio::test]
async fn test_predict_partial_responses() {
    let request = post_json(json!({"responses": {"q1": "slightly-disagree"}}));
    let (status, body) = send(loaded_app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["aq10_score"], json!(0));
    assert_eq!(body["model_prediction"], json!(0));
    assert_eq!(body["feature_vector"], json!([0, 0, 0, 0, 0, 0, 0, 0, 0, 0]));
    assert_eq!(body["interpretation"]["aq10_interpretation"], json!("Low likelihood"));
    assert_eq!(body["interpretation"]["model_interpretation"], json!("Negative screening"));
    assert_eq!(body["interpretation"]["agreement"], json!("Results agree"));
}

#[tokio::test]
async fn test_predict_without_responses() {
    for payload in [json!({}), json!({"responses": {}}), json!({"responses": null})] {
        let (status, body) = send(loaded_app(), post_json(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "No responses provided"}));
    }
}

#[tokio::test]
async fn test_predict_with_non_object_body() {
    for payload in [json!([{"q1": "definitely-agree"}]), json!("definitely-agree"), json!(7)] {
        let (status, body) = send(loaded_app(), post_json(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "No responses provided"}));
    }
}

#[tokio::test]
async fn test_predict_with_malformed_body() {
    let request = Request::builder()
        .method("POST")
        .uri("/predict")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let (status, body) = send(loaded_app(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().is_some());
}

#[tokio::test]
async fn test_predict_without_model() {
    let request = post_json(json!({"responses": {"q1": "definitely-agree"}}));
    let (status, body) = send(unloaded_app(), request).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Model not loaded"}));

    // 模型未載入時，空請求也一律回 500
    let (status, _) = send(unloaded_app(), post_json(json!({}))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_cors_allows_any_origin_by_default() {
    let request = Request::builder()
        .uri("/health")
        .header(header::ORIGIN, "http://localhost:5500")
        .body(Body::empty())
        .unwrap();

    let response = loaded_app().oneshot(request).await.unwrap();
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "*"
    );
}

#[tokio::test]
async fn test_cors_restricted_origins() {
    let origins = vec!["http://localhost:5500".to_string()];
    let app = router(AppState::new(None), &origins);

    let allowed = Request::builder()
        .uri("/health")
        .header(header::ORIGIN, "http://localhost:5500")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(allowed).await.unwrap();
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "http://localhost:5500"
    );

    let denied = Request::builder()
        .uri("/health")
        .header(header::ORIGIN, "http://evil.example")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(denied).await.unwrap();
    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}
