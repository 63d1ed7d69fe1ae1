//! Request helpers driving the router in-process

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

/// Issue a GET and return status and raw body
pub async fn get(router: &Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = router.clone().oneshot(request).await.unwrap();

    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

/// Issue a GET and parse the body as JSON
pub async fn get_json(router: &Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = get(router, uri).await;
    (status, serde_json::from_slice(&body).unwrap())
}
