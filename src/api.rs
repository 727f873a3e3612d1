//! HTTP API for account signup

use crate::config::{StoreBackend, StoreConfig, DEFAULT_MAX_BODY_BYTES};
use crate::registration::{
    MemoryUserStore, SignupError, SignupHandler, StoreError, UserDirectory, UserStore,
};
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, DefaultBodyLimit, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub signup: SignupHandler,
    /// Largest accepted request body, in bytes
    pub body_limit: usize,
}

impl AppState {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self {
            signup: SignupHandler::new(store),
            body_limit: DEFAULT_MAX_BODY_BYTES,
        }
    }

    pub fn with_body_limit(mut self, limit: usize) -> Self {
        self.body_limit = limit;
        self
    }

    /// Open the configured store backend.
    pub async fn from_config(config: &StoreConfig) -> Result<Self, StoreError> {
        let store: Arc<dyn UserStore> = match config.backend {
            StoreBackend::Memory => Arc::new(MemoryUserStore::new(config.unique_email)),
            StoreBackend::Directory => {
                Arc::new(UserDirectory::open(&config.root, config.unique_email).await?)
            }
        };

        info!("Using {} user store", config.backend);
        Ok(Self::new(store))
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
    pub service: String,
}

// Configure routes
pub fn create_router(state: AppState) -> Router {
    let body_limit = state.body_limit;

    Router::new()
        .route("/", get(health_check))
        .route("/auth/signup", post(signup))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

// Health check endpoint
async fn health_check() -> impl IntoResponse {
    Json(StatusResponse {
        status: "ok".to_string(),
        service: "swiftmail-signup".to_string(),
    })
}

/// `application/json` or any `application/*+json`, parameters ignored.
fn is_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    else {
        return false;
    };

    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    match essence.split_once('/') {
        Some(("application", subtype)) => subtype == "json" || subtype.ends_with("+json"),
        _ => false,
    }
}

// The body is taken as raw bytes so any decode or buffering failure maps to
// `invalid_body_content`.
async fn signup(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<MessageResponse>, SignupError> {
    if !is_json_content_type(&headers) {
        return Err(SignupError::InvalidBody(
            "Content-Type must be application/json".to_string(),
        ));
    }
    let body = body.map_err(|e| SignupError::InvalidBody(e.body_text()))?;

    state.signup.signup(&body).await?;

    Ok(Json(MessageResponse {
        message: "success".to_string(),
    }))
}
