//! Persisted user record

use crate::registration::request::SignupRequest;
use crate::registration::user_data::{UserCredentials, UserData};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Serialize, Deserialize, PartialEq)]
pub struct UserRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    pub dp: String,
    pub password: String,
    pub metadata: UserMetadata,
    // Profiles stored before these existed load with the signup defaults.
    #[serde(default)]
    pub data: UserData,
    #[serde(default)]
    pub credentials: UserCredentials,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserMetadata {
    pub date_created: DateTime<Utc>,
    pub date_updated: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
}

impl UserMetadata {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            date_created: now,
            date_updated: now,
            last_seen: now,
        }
    }
}

impl UserRecord {
    pub fn from_request(request: SignupRequest, now: DateTime<Utc>) -> Self {
        Self {
            id: request.id,
            name: request.name,
            email: request.email,
            dp: request.avatar_ref,
            password: request.password,
            metadata: UserMetadata::at(now),
            data: UserData::default(),
            credentials: UserCredentials::default(),
        }
    }
}

impl std::fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserRecord")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("dp", &self.dp)
            .field("password", &"<redacted>")
            .field("metadata", &self.metadata)
            .field("data", &self.data)
            .field("credentials", &self.credentials)
            .finish()
    }
}
