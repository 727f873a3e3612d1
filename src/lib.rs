//! Account signup service
//!
//! Validates a signup body, checks the email is not already registered, and
//! stores a new user record.

pub mod api;
pub mod config;
pub mod registration;

pub use api::{create_router, AppState};
pub use config::{ServiceConfig, StoreBackend, StoreConfig};
pub use registration::{SignupError, SignupHandler, StoreError, UserRecord, UserStore};
