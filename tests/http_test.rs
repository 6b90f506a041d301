use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use docgraph::config::EngineConfig;
use docgraph::embed::HashingEncoder;
use docgraph::engine::SearchEngine;
use docgraph::http::router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> (SearchEngine, Router) {
    let engine = SearchEngine::new(Arc::new(HashingEncoder::new(384)), &EngineConfig::default());
    (engine.clone(), router(engine))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_create_and_search() {
    let (_, app) = app();

    let (status, body) = send(
        &app,
        post_json(
            "/documents",
            json!({
                "doc_type": "policy",
                "content": "Quantum Technology Protection Act",
                "metadata": {"source": "congress.gov", "year": 2024}
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "success", "id": 0}));

    let (status, body) = send(
        &app,
        post_json("/documents", json!({"doc_type": "news", "content": "Qubit coherence record"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 1);

    let (status, body) = send(
        &app,
        post_json("/search", json!({"query": "Quantum Technology Protection Act", "top_k": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["id"], 0);
    assert_eq!(results[0]["type"], "policy");
    assert_eq!(results[0]["content"], "Quantum Technology Protection Act");
    assert_eq!(results[0]["metadata"], json!({"source": "congress.gov", "year": 2024}));
    assert!(results[0]["related_docs"].is_array());
    assert!((results[0]["similarity"].as_f64().unwrap() - 1.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_search_type_filter() {
    let (engine, app) = app();
    engine.add_document("news", "Qubit coherence record", Default::default()).await.unwrap();
    engine.add_document("policy", "Export controls on qubits", Default::default()).await.unwrap();

    let (status, body) = send(
        &app,
        post_json("/search", json!({"query": "qubit", "doc_type": "policy", "top_k": 5})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["type"], "policy");
}

#[tokio::test]
async fn test_analyze_endpoint() {
    let (engine, app) = app();
    engine.add_document("news", "Qubit coherence record", Default::default()).await.unwrap();

    let (status, body) = send(&app, get("/analyze/0")).await;
    assert_eq!(status, StatusCode::OK);
    let analysis = &body["analysis"];
    assert_eq!(analysis["centrality"], json!({"0": 0.0}));
    assert_eq!(analysis["clustering"], json!({"0": 0.0}));
    assert_eq!(analysis["communities"], json!([[0]]));
    assert!((analysis["importance"]["0"].as_f64().unwrap() - 1.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_analyze_missing_is_404() {
    let (_, app) = app();
    let (status, body) = send(&app, get("/analyze/42")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn test_degenerate_content_is_500() {
    let (engine, app) = app();
    let (status, body) = send(
        &app,
        post_json("/documents", json!({"doc_type": "news", "content": ""})),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "degenerate_vector");
    assert!(body["message"].as_str().unwrap().contains("Degenerate"));
    assert_eq!(engine.stats().await.document_count, 0);
}

#[tokio::test]
async fn test_malformed_body_is_client_error() {
    let (_, app) = app();
    let (status, _) = send(&app, post_json("/documents", json!({"content": "no type"}))).await;
    assert!(status.is_client_error());
}

#[tokio::test]
async fn test_get_document_and_status() {
    let (engine, app) = app();
    engine.add_document("market", "Quantum computing market", Default::default()).await.unwrap();

    let (status, body) = send(&app, get("/documents/0")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["type"], "market");
    assert_eq!(body["content"], "Quantum computing market");

    let (status, _) = send(&app, get("/documents/5")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, get("/status")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], docgraph::VERSION);
    assert_eq!(body["storage"]["documents"], 1);
    assert_eq!(body["storage"]["edges"], 0);
    assert_eq!(body["storage"]["types"]["market"], 1);
}

#[tokio::test]
async fn test_trailing_slash_create_route() {
    let (engine, app) = app();
    let (status, body) = send(
        &app,
        post_json(
            "/documents/",
            json!({"doc_type": "scholarship", "content": "STEM fellowship", "metadata": {"amount": 10000}}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "success", "id": 0}));
    assert_eq!(engine.stats().await.document_count, 1);
}

#[tokio::test]
async fn test_trailing_slash_search_route() {
    let (engine, app) = app();
    engine.add_document("news", "Qubit coherence record", Default::default()).await.unwrap();

    let (status, body) = send(
        &app,
        post_json("/search/", json!({"query": "Qubit coherence record", "top_k": 5})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["id"], 0);
}
