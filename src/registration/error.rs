//! Error types for user registration

use crate::registration::signup::SignupStage;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failures raised by a [`UserStore`](crate::registration::UserStore) backend.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to (de)serialize user record: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Email already registered: {0}")]
    EmailTaken(String),

    #[error("Invalid record key: {0:?}")]
    InvalidKey(String),
}

#[derive(Error, Debug)]
pub enum SignupError {
    #[error("Invalid body content: {0}")]
    InvalidBody(String),

    #[error("User already exists: {0}")]
    UserAlreadyExists(String),

    #[error("Failed to look up existing users: {0}")]
    Lookup(#[source] StoreError),

    #[error("Failed to create user: {0}")]
    Creation(#[source] StoreError),
}

impl SignupError {
    /// The stage at which the flow was terminated.
    pub fn stage(&self) -> SignupStage {
        match self {
            SignupError::InvalidBody(_) => SignupStage::Validating,
            SignupError::UserAlreadyExists(_) | SignupError::Lookup(_) => {
                SignupStage::CheckingUniqueness
            }
            SignupError::Creation(_) => SignupStage::Creating,
        }
    }

    // 403 rather than 400 keeps existing clients working.
    pub fn status_code(&self) -> StatusCode {
        match self {
            SignupError::InvalidBody(_) => StatusCode::FORBIDDEN,
            SignupError::UserAlreadyExists(_) => StatusCode::CONFLICT,
            SignupError::Lookup(_) | SignupError::Creation(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Wire message placed in the `message` field of the response body.
    pub fn message(&self) -> &'static str {
        match self {
            SignupError::InvalidBody(_) => "invalid_body_content",
            SignupError::UserAlreadyExists(_) => "user_already_exists",
            SignupError::Lookup(_) | SignupError::Creation(_) => "internal_server_error",
        }
    }
}

impl IntoResponse for SignupError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(stage = %self.stage(), "Signup failed: {}", self);
        } else {
            tracing::info!(stage = %self.stage(), "Signup rejected: {}", self);
        }

        (status, Json(json!({ "message": self.message() }))).into_response()
    }
}
