//! Signup request body and its validation

use crate::registration::error::SignupError;
use serde::Deserialize;
use serde_json::Value;

/// A validated signup body. All five fields are required strings.
#[derive(Clone, Deserialize, PartialEq, Eq)]
pub struct SignupRequest {
    #[serde(rename = "uid")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(rename = "dp")]
    pub avatar_ref: String,
    pub password: String,
}

impl SignupRequest {
    /// Decode a raw body. Fails as a whole if the body is not a JSON object
    /// or any field is missing, `null`, or not a string.
    pub fn from_json(body: &[u8]) -> Result<Self, SignupError> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| SignupError::InvalidBody(format!("Malformed JSON: {}", e)))?;

        // Derived struct deserializers also accept sequences; only objects are valid here.
        if !value.is_object() {
            return Err(SignupError::InvalidBody(
                "Body must be a JSON object".to_string(),
            ));
        }

        serde_json::from_value(value).map_err(|e| SignupError::InvalidBody(e.to_string()))
    }
}

impl std::fmt::Debug for SignupRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignupRequest")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("avatar_ref", &self.avatar_ref)
            .field("password", &"<redacted>")
            .finish()
    }
}
