//! Test fixtures for the scheduling API tests
//!
//! Builds routers over a fresh in-memory store and wraps the request and
//! response plumbing the API tests share.
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use schedulink_db::MemoryStore;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

/// A router over an empty in-memory store.
pub fn create_test_app() -> Router {
    schedulink_booking::routes(Arc::new(MemoryStore::new()))
}

/// Sends a request with an optional JSON body and returns status and parsed body.
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

/// Creates a user and returns its id.
pub async fn create_test_user(app: &Router, email: &str) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/users",
        Some(json!({ "email": email, "name": "Test User" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "unexpected body: {}", body);
    body["id"].as_i64().unwrap()
}

/// Creates a slot on `date` and returns its id.
pub async fn create_test_slot(app: &Router, date: &str, creator_id: Option<i64>) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/slots",
        Some(json!({
            "title": "Consultation",
            "description": "Initial call",
            "date": date,
            "start_time": "09:00",
            "end_time": "09:30",
            "user_id": creator_id,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "unexpected body: {}", body);
    body["id"].as_i64().unwrap()
}
