/// Common test utilities and fixtures
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use swiftmail_signup::registration::MemoryUserStore;
use swiftmail_signup::{create_router, AppState};
use tower::util::ServiceExt;

/// Router backed by a fresh in-memory store
pub fn create_test_app(unique_email: bool) -> (Router, Arc<MemoryUserStore>) {
    let store = Arc::new(MemoryUserStore::new(unique_email));
    let app = create_router(AppState::new(store.clone()));
    (app, store)
}

pub fn signup_request(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .uri("/auth/signup")
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

/// Send a request and return the status and the decoded JSON body
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body_bytes).unwrap())
}

pub mod fixtures {
    use serde_json::{json, Value};

    pub fn ann() -> Value {
        json!({
            "uid": "u1",
            "name": "Ann",
            "email": "a@x.com",
            "dp": "img1",
            "password": "p1"
        })
    }
}
