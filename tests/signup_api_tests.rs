/// Signup API tests
/// Drive the router end to end against in-memory and on-disk stores
mod common;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use common::{create_test_app, fixtures, send, signup_request};
use serde_json::json;
use std::io;
use std::sync::Arc;
use swiftmail_signup::registration::{MemoryUserStore, StoreError, UserRecord, UserStore};
use swiftmail_signup::{create_router, AppState, StoreBackend, StoreConfig};
use tempfile::TempDir;

fn connection_reset() -> StoreError {
    StoreError::Io(io::Error::new(io::ErrorKind::ConnectionReset, "connection reset"))
}

/// Store whose every call fails
struct BrokenStore;

#[async_trait]
impl UserStore for BrokenStore {
    async fn find_by_email(&self, _email: &str) -> Result<Vec<UserRecord>, StoreError> {
        Err(connection_reset())
    }

    async fn create_user(&self, _record: &UserRecord) -> Result<(), StoreError> {
        Err(connection_reset())
    }

    async fn get_user(&self, _id: &str) -> Result<Option<UserRecord>, StoreError> {
        Err(connection_reset())
    }

    async fn list_users(&self) -> Result<Vec<UserRecord>, StoreError> {
        Err(connection_reset())
    }
}

#[tokio::test]
async fn test_health_check() {
    let (app, _) = create_test_app(true);

    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

/// Scenario A: novel email on an empty store
#[tokio::test]
async fn test_signup_success() {
    let (app, store) = create_test_app(true);

    let (status, body) = send(&app, signup_request(fixtures::ann().to_string())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "success" }));

    let user = store.get_user("u1").await.unwrap().unwrap();
    assert_eq!(user.name, "Ann");
    assert_eq!(user.email, "a@x.com");
    assert_eq!(user.dp, "img1");
    assert_eq!(user.password, "p1");
    assert_eq!(store.len().await, 1);
}

/// Scenario B: the same body twice
#[tokio::test]
async fn test_duplicate_signup_conflicts() {
    let (app, store) = create_test_app(true);

    let (status, _) = send(&app, signup_request(fixtures::ann().to_string())).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, signup_request(fixtures::ann().to_string())).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body, json!({ "message": "user_already_exists" }));

    assert_eq!(store.find_by_email("a@x.com").await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_existing_email_with_new_id_conflicts() {
    let (app, store) = create_test_app(true);
    send(&app, signup_request(fixtures::ann().to_string())).await;

    let mut body = fixtures::ann();
    body["uid"] = json!("u2");
    let (status, _) = send(&app, signup_request(body.to_string())).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert!(store.get_user("u2").await.unwrap().is_none());
}

/// Scenario C and its siblings: any one field missing
#[tokio::test]
async fn test_missing_field_is_rejected() {
    for field in ["uid", "name", "email", "dp", "password"] {
        let (app, store) = create_test_app(true);
        let mut body = fixtures::ann();
        body.as_object_mut().unwrap().remove(field);

        let (status, response) = send(&app, signup_request(body.to_string())).await;

        assert_eq!(status, StatusCode::FORBIDDEN, "missing `{}`", field);
        assert_eq!(response, json!({ "message": "invalid_body_content" }));
        assert!(store.is_empty().await);
    }
}

#[tokio::test]
async fn test_wrong_shapes_are_rejected() {
    let (app, store) = create_test_app(true);

    let mut null_email = fixtures::ann();
    null_email["email"] = json!(null);
    let mut numeric_uid = fixtures::ann();
    numeric_uid["uid"] = json!(7);

    let bodies = [
        null_email.to_string(),
        numeric_uid.to_string(),
        "{not json".to_string(),
        "[]".to_string(),
        String::new(),
    ];

    for body in bodies {
        let (status, response) = send(&app, signup_request(body.clone())).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "body {:?}", body);
        assert_eq!(response["message"], "invalid_body_content");
    }
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_non_json_content_type_is_rejected() {
    let (app, store) = create_test_app(true);

    let plain = Request::builder()
        .uri("/auth/signup")
        .method("POST")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from(fixtures::ann().to_string()))
        .unwrap();
    let missing = Request::builder()
        .uri("/auth/signup")
        .method("POST")
        .body(Body::from(fixtures::ann().to_string()))
        .unwrap();

    for request in [plain, missing] {
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body, json!({ "message": "invalid_body_content" }));
    }
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_json_content_type_with_charset_is_accepted() {
    let (app, store) = create_test_app(true);

    let request = Request::builder()
        .uri("/auth/signup")
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json; charset=utf-8")
        .body(Body::from(fixtures::ann().to_string()))
        .unwrap();
    let (status, _) = send(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(store.len().await, 1);
}

/// Bodies past axum's stock 2 MB limit are still accepted
#[tokio::test]
async fn test_large_body_within_limit_is_accepted() {
    let (app, store) = create_test_app(true);

    let mut body = fixtures::ann();
    body["password"] = json!("x".repeat(3 * 1024 * 1024));
    let (status, response) = send(&app, signup_request(body.to_string())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response, json!({ "message": "success" }));
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_body_over_limit_is_invalid_body() {
    let store = Arc::new(MemoryUserStore::default());
    let app = create_router(AppState::new(store.clone()).with_body_limit(1024));

    let mut body = fixtures::ann();
    body["password"] = json!("x".repeat(4096));
    let (status, response) = send(&app, signup_request(body.to_string())).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(response, json!({ "message": "invalid_body_content" }));
    assert!(store.is_empty().await);
}

/// No id-uniqueness check: a known id with a novel email replaces the record
#[tokio::test]
async fn test_same_id_new_email_overwrites() {
    let (app, store) = create_test_app(true);
    send(&app, signup_request(fixtures::ann().to_string())).await;

    let mut body = fixtures::ann();
    body["email"] = json!("ann@new.com");
    body["name"] = json!("Ann B");
    let (status, _) = send(&app, signup_request(body.to_string())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(store.len().await, 1);
    let user = store.get_user("u1").await.unwrap().unwrap();
    assert_eq!(user.email, "ann@new.com");
    assert_eq!(user.name, "Ann B");
}

#[tokio::test]
async fn test_store_failure_is_internal_error() {
    let app = create_router(AppState::new(Arc::new(BrokenStore)));

    let (status, body) = send(&app, signup_request(fixtures::ann().to_string())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "message": "internal_server_error" }));
}

#[tokio::test]
async fn test_directory_backend() {
    let temp_dir = TempDir::new().unwrap();
    let config = StoreConfig {
        backend: StoreBackend::Directory,
        root: temp_dir.path().to_path_buf(),
        unique_email: true,
    };
    let app = create_router(AppState::from_config(&config).await.unwrap());

    let (status, _) = send(&app, signup_request(fixtures::ann().to_string())).await;
    assert_eq!(status, StatusCode::OK);
    assert!(temp_dir
        .path()
        .join("users")
        .join("u1")
        .join("profile.json")
        .exists());

    let (status, _) = send(&app, signup_request(fixtures::ann().to_string())).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_directory_backend_rejects_path_like_id() {
    let temp_dir = TempDir::new().unwrap();
    let config = StoreConfig {
        backend: StoreBackend::Directory,
        root: temp_dir.path().to_path_buf(),
        unique_email: true,
    };
    let app = create_router(AppState::from_config(&config).await.unwrap());

    let mut body = fixtures::ann();
    body["uid"] = json!("../outside");
    let (status, response) = send(&app, signup_request(body.to_string())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response["message"], "internal_server_error");
    assert!(!temp_dir.path().join("outside").exists());
}

#[tokio::test]
async fn test_directory_backend_survives_corrupt_profile() {
    let temp_dir = TempDir::new().unwrap();
    let config = StoreConfig {
        backend: StoreBackend::Directory,
        root: temp_dir.path().to_path_buf(),
        unique_email: true,
    };
    let app = create_router(AppState::from_config(&config).await.unwrap());

    let broken = temp_dir.path().join("users").join("broken");
    std::fs::create_dir_all(&broken).unwrap();
    std::fs::write(broken.join("profile.json"), b"\x00garbage").unwrap();

    let (status, body) = send(&app, signup_request(fixtures::ann().to_string())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "success" }));

    let (status, _) = send(&app, signup_request(fixtures::ann().to_string())).await;
    assert_eq!(status, StatusCode::CONFLICT);
}
