use std::sync::Arc;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use tower::ServiceExt;
use serde_json::{json, Value};

use diagnosis_cell::router::diagnosis_routes;
use diagnosis_cell::services::DiagnosisService;
use shared_config::AppConfig;

fn create_test_app() -> Router {
    let service = DiagnosisService::from_config(&AppConfig::default())
        .expect("embedded knowledge base loads");
    diagnosis_routes(Arc::new(service))
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn read_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_calculate_endpoint() {
    let app = create_test_app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/calculate",
            json!({ "symptoms": ["Dor de Cabeça", "sensibilidade à luz", "náusea"] }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json_response = read_json(response).await;
    let diagnoses = json_response["diagnoses"].as_array().unwrap();
    assert!(!diagnoses.is_empty() && diagnoses.len() <= 3);
    assert_eq!(diagnoses[0]["condition"], "Enxaqueca");
    assert!(diagnoses.iter().all(|d| d["probability"].as_f64().unwrap() > 0.1));
}

#[tokio::test]
async fn test_calculate_endpoint_is_deterministic() {
    let app = create_test_app();
    let body = json!({ "symptoms": ["febre", "tosse", "dor muscular"] });

    let first = read_json(
        app.clone()
            .oneshot(json_request("POST", "/calculate", body.clone()))
            .await
            .unwrap(),
    )
    .await;
    let second = read_json(
        app.oneshot(json_request("POST", "/calculate", body))
            .await
            .unwrap(),
    )
    .await;

    assert_eq!(first, second);
    assert_eq!(first["diagnoses"][0]["condition"], "Gripe");
}

#[tokio::test]
async fn test_suggest_endpoint() {
    let app = create_test_app();

    let response = app
        .oneshot(json_request("POST", "/suggest", json!({ "partialSymptom": "coceira" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json_response = read_json(response).await;
    assert_eq!(
        json_response["suggestions"],
        json!(["coceira no nariz", "coceira nos olhos"])
    );
}

#[tokio::test]
async fn test_validation_error_response() {
    let app = create_test_app();
    let too_many: Vec<String> = (0..31).map(|i| format!("sintoma {}", i)).collect();

    let response = app
        .oneshot(json_request("POST", "/calculate", json!({ "symptoms": too_many })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json_response = read_json(response).await;
    assert!(json_response["error"].is_string());
}

#[tokio::test]
async fn test_condition_endpoints() {
    let app = create_test_app();

    let request = Request::builder()
        .method("GET")
        .uri("/conditions/Rinite%20Al%C3%A9rgica")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json_response = read_json(response).await;
    assert_eq!(json_response["baseProbability"], 0.8);
    assert_eq!(json_response["severity"], "baixa");

    let request = Request::builder()
        .method("GET")
        .uri("/conditions/inexistente")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_symptom_categories_endpoint() {
    let app = create_test_app();

    let request = Request::builder()
        .method("GET")
        .uri("/symptom-categories")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json_response = read_json(response).await;
    let names: Vec<&str> = json_response["categories"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert!(names.contains(&"Dor"));
    assert!(names.contains(&"Respiratórios"));
}
