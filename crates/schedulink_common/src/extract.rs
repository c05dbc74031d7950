// --- File: crates/schedulink_common/src/extract.rs ---
//! Request extractors whose rejections render like every other error.
//!
//! axum's own `Json`, `Query` and `Path` reject with plain-text bodies and
//! status codes such as 415 or 422. These wrappers turn those rejections into
//! a [`SchedulinkError::ValidationError`] so clients always get a 400 with the
//! JSON error body.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts};

use crate::error::{validation_error, SchedulinkError};

/// JSON request body.
#[derive(Debug, Clone, Copy, Default, FromRequest)]
#[from_request(via(axum::Json), rejection(SchedulinkError))]
pub struct ValidJson<T>(pub T);

/// Query string.
#[derive(Debug, Clone, Copy, Default, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(SchedulinkError))]
pub struct ValidQuery<T>(pub T);

/// Path parameters.
#[derive(Debug, Clone, Copy, Default, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(SchedulinkError))]
pub struct ValidPath<T>(pub T);

impl From<JsonRejection> for SchedulinkError {
    fn from(rejection: JsonRejection) -> Self {
        validation_error(rejection.body_text())
    }
}

impl From<QueryRejection> for SchedulinkError {
    fn from(rejection: QueryRejection) -> Self {
        validation_error(rejection.body_text())
    }
}

impl From<PathRejection> for SchedulinkError {
    fn from(rejection: PathRejection) -> Self {
        validation_error(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        routing::{get, post},
        Router,
    };
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize)]
    struct Named {
        name: String,
    }

    #[derive(Deserialize)]
    struct Flag {
        on: Option<bool>,
    }

    fn app() -> Router {
        Router::new()
            .route(
                "/named",
                post(|ValidJson(body): ValidJson<Named>| async move { body.name }),
            )
            .route(
                "/items/{id}",
                get(|ValidPath(id): ValidPath<i64>| async move { id.to_string() }),
            )
            .route(
                "/flag",
                get(|ValidQuery(flag): ValidQuery<Flag>| async move {
                    format!("{:?}", flag.on)
                }),
            )
    }

    async fn call(request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or_default())
    }

    fn assert_validation_body(status: StatusCode, body: &serde_json::Value) {
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"].as_str().is_some_and(|d| !d.is_empty()));
        assert_eq!(body["error"]["code"], 400);
    }

    #[tokio::test]
    async fn missing_json_field_is_bad_request() {
        let request = Request::post("/named")
            .header("content-type", "application/json")
            .body(Body::from("{}"))
            .unwrap();
        let (status, body) = call(request).await;
        assert_validation_body(status, &body);
    }

    #[tokio::test]
    async fn missing_content_type_is_bad_request() {
        let request = Request::post("/named")
            .body(Body::from(r#"{"name":"Ana"}"#))
            .unwrap();
        let (status, body) = call(request).await;
        assert_validation_body(status, &body);
    }

    #[tokio::test]
    async fn non_numeric_path_is_bad_request() {
        let request = Request::get("/items/abc").body(Body::empty()).unwrap();
        let (status, body) = call(request).await;
        assert_validation_body(status, &body);
    }

    #[tokio::test]
    async fn malformed_query_is_bad_request() {
        let request = Request::get("/flag?on=maybe").body(Body::empty()).unwrap();
        let (status, body) = call(request).await;
        assert_validation_body(status, &body);
    }

    #[tokio::test]
    async fn valid_input_passes_through() {
        let request = Request::get("/items/7").body(Body::empty()).unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
