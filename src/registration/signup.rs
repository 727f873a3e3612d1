//! Signup flow: validate the body, check the email is free, create the user

use crate::registration::error::{SignupError, StoreError};
use crate::registration::request::SignupRequest;
use crate::registration::store::UserStore;
use crate::registration::user_record::UserRecord;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupStage {
    Validating,
    CheckingUniqueness,
    Creating,
    Done,
}

impl std::fmt::Display for SignupStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignupStage::Validating => write!(f, "validating"),
            SignupStage::CheckingUniqueness => write!(f, "checking_uniqueness"),
            SignupStage::Creating => write!(f, "creating"),
            SignupStage::Done => write!(f, "done"),
        }
    }
}

#[derive(Clone)]
pub struct SignupHandler {
    store: Arc<dyn UserStore>,
}

impl SignupHandler {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Run the whole flow on a raw request body.
    ///
    /// Each stage either hands off to the next or ends the flow; nothing is retried.
    pub async fn signup(&self, body: &[u8]) -> Result<UserRecord, SignupError> {
        debug!(stage = %SignupStage::Validating, "Decoding signup body");
        let request = SignupRequest::from_json(body)?;

        info!(stage = %SignupStage::CheckingUniqueness, "Signup request for user id: {}", request.id);
        if self.email_exists(&request.email).await? {
            return Err(SignupError::UserAlreadyExists(request.email));
        }

        debug!(stage = %SignupStage::Creating, "Creating user: {}", request.id);
        let user = self.create_user(request).await?;

        info!(stage = %SignupStage::Done, "Successfully registered user: {}", user.id);
        Ok(user)
    }

    /// Whether any stored record holds exactly this email.
    pub async fn email_exists(&self, email: &str) -> Result<bool, SignupError> {
        let matches = self
            .store
            .find_by_email(email)
            .await
            .map_err(SignupError::Lookup)?;
        Ok(!matches.is_empty())
    }

    /// Persist a record for `request`, overwriting any record with the same id.
    pub async fn create_user(&self, request: SignupRequest) -> Result<UserRecord, SignupError> {
        let user = UserRecord::from_request(request, Utc::now());

        match self.store.create_user(&user).await {
            Ok(()) => Ok(user),
            Err(StoreError::EmailTaken(email)) => Err(SignupError::UserAlreadyExists(email)),
            Err(e) => Err(SignupError::Creation(e)),
        }
    }
}
