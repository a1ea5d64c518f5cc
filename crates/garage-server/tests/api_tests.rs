//! Integration tests for the API routes.
//!
//! The router is driven in-process with `oneshot` over a file-backed store.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use garage_core::DocumentStore;
use garage_file::FileStore;
use garage_server::{Inventory, router};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

/// Creates a router over a fresh database in a temporary directory.
async fn create_test_app() -> (Router, TempDir) {
    let tmp_dir = TempDir::new().expect("Failed to create temp dir");
    let store = FileStore::new(tmp_dir.path(), "my-garage");
    store
        .ensure_database()
        .await
        .expect("Failed to create database");
    (router(Arc::new(Inventory::new(store))), tmp_dir)
}

fn corolla() -> Value {
    json!({
        "brand": "Toyota",
        "model": "Corolla",
        "year": 2020,
        "color": "Blue",
        "engine": "I4",
        "licensePlate": "ABC123",
        "owner": { "name": "Jane", "contact": "555-0100" }
    })
}

fn json_request(method: Method, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Sends a request and returns the status and JSON body.
async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

async fn create(app: &Router, body: &Value) -> Value {
    let (status, doc) = send(app, json_request(Method::POST, "/create", body)).await;
    assert_eq!(status, StatusCode::OK);
    doc
}

// ============================================================================
// Create / Read
// ============================================================================

#[tokio::test]
async fn test_create_returns_fields_with_id_and_rev() {
    let (app, _tmp) = create_test_app().await;

    let doc = create(&app, &corolla()).await;

    assert!(doc["_id"].as_str().is_some_and(|id| !id.is_empty()));
    assert!(doc["_rev"].as_str().is_some_and(|rev| rev.starts_with("1-")));
    for (key, value) in corolla().as_object().unwrap() {
        assert_eq!(&doc[key], value, "field {key}");
    }
}

#[tokio::test]
async fn test_created_record_appears_in_readall() {
    let (app, _tmp) = create_test_app().await;

    let doc = create(&app, &corolla()).await;
    let (status, all) = send(&app, empty_request(Method::GET, "/readall")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(all, json!([doc]));
}

#[tokio::test]
async fn test_readall_empty() {
    let (app, _tmp) = create_test_app().await;

    let (status, all) = send(&app, empty_request(Method::GET, "/readall")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(all, json!([]));
}

#[tokio::test]
async fn test_read_one() {
    let (app, _tmp) = create_test_app().await;

    let doc = create(&app, &corolla()).await;
    let uri = format!("/read/{}", doc["_id"].as_str().unwrap());
    let (status, read) = send(&app, empty_request(Method::GET, &uri)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(read, doc);
}

#[tokio::test]
async fn test_read_missing_is_500() {
    let (app, _tmp) = create_test_app().await;

    let (status, body) = send(&app, empty_request(Method::GET, "/read/nope")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("missing"));
}

// ============================================================================
// Update
// ============================================================================

#[tokio::test]
async fn test_partial_update_preserves_other_fields() {
    let (app, _tmp) = create_test_app().await;

    let doc = create(&app, &corolla()).await;
    let uri = format!("/update/{}", doc["_id"].as_str().unwrap());
    let (status, updated) =
        send(&app, json_request(Method::PUT, &uri, &json!({ "color": "Red" }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["color"], "Red");
    for key in ["brand", "model", "year", "engine", "licensePlate", "owner"] {
        assert_eq!(updated[key], doc[key], "field {key}");
    }
    assert_eq!(updated["_id"], doc["_id"]);
    assert_ne!(updated["_rev"], doc["_rev"]);
}

#[tokio::test]
async fn test_update_with_current_rev() {
    let (app, _tmp) = create_test_app().await;

    let doc = create(&app, &corolla()).await;
    let uri = format!(
        "/update/{}?rev={}",
        doc["_id"].as_str().unwrap(),
        doc["_rev"].as_str().unwrap()
    );
    let (status, updated) =
        send(&app, json_request(Method::PUT, &uri, &json!({ "engine": "Hybrid" }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["engine"], "Hybrid");
}

#[tokio::test]
async fn test_update_with_stale_rev_fails_and_keeps_record() {
    let (app, _tmp) = create_test_app().await;

    let doc = create(&app, &corolla()).await;
    let id = doc["_id"].as_str().unwrap();
    let stale = doc["_rev"].as_str().unwrap();

    let uri = format!("/update/{id}");
    send(&app, json_request(Method::PUT, &uri, &json!({ "color": "Red" }))).await;

    let uri = format!("/update/{id}?rev={stale}");
    let (status, body) =
        send(&app, json_request(Method::PUT, &uri, &json!({ "color": "Green" }))).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("conflict"));

    let (_, current) = send(&app, empty_request(Method::GET, &format!("/read/{id}"))).await;
    assert_eq!(current["color"], "Red");
}

#[tokio::test]
async fn test_update_missing_is_500() {
    let (app, _tmp) = create_test_app().await;

    let (status, body) = send(
        &app,
        json_request(Method::PUT, "/update/nope", &json!({ "color": "Red" })),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());
}

// ============================================================================
// Delete
// ============================================================================

#[tokio::test]
async fn test_delete_removes_record() {
    let (app, _tmp) = create_test_app().await;

    let doc = create(&app, &corolla()).await;
    let id = doc["_id"].as_str().unwrap();

    let (status, outcome) =
        send(&app, empty_request(Method::DELETE, &format!("/delete/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(outcome["ok"], true);
    assert_eq!(outcome["id"], id);
    assert!(outcome["rev"].is_string());

    let (_, all) = send(&app, empty_request(Method::GET, "/readall")).await;
    assert_eq!(all, json!([]));

    let (status, _) = send(&app, empty_request(Method::GET, &format!("/read/{id}"))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_second_delete_with_stale_rev_fails() {
    let (app, _tmp) = create_test_app().await;

    let doc = create(&app, &corolla()).await;
    let uri = format!(
        "/delete/{}?rev={}",
        doc["_id"].as_str().unwrap(),
        doc["_rev"].as_str().unwrap()
    );

    let (status, _) = send(&app, empty_request(Method::DELETE, &uri)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, empty_request(Method::DELETE, &uri)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());
}

// ============================================================================
// Error shape
// ============================================================================

#[tokio::test]
async fn test_malformed_body_is_500() {
    let (app, _tmp) = create_test_app().await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/create")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_non_object_body_is_500() {
    let (app, _tmp) = create_test_app().await;

    let (status, body) = send(&app, json_request(Method::POST, "/create", &json!([1, 2]))).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("JSON object"));
}

#[tokio::test]
async fn test_reserved_id_is_500() {
    let (app, _tmp) = create_test_app().await;

    let (status, body) = send(&app, empty_request(Method::GET, "/read/_design")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("invalid"));
}

// ============================================================================
// CORS
// ============================================================================

#[tokio::test]
async fn test_cors_preflight_any_origin() {
    let (app, _tmp) = create_test_app().await;

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/update/abc")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "PUT")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

#[tokio::test]
async fn test_cors_header_on_simple_request() {
    let (app, _tmp) = create_test_app().await;

    let request = Request::builder()
        .uri("/readall")
        .header(header::ORIGIN, "http://example.com")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}
