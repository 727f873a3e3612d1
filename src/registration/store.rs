//! User store abstraction

use crate::registration::error::StoreError;
use crate::registration::user_record::UserRecord;
use async_trait::async_trait;

/// Document store holding [`UserRecord`]s keyed by id.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// All records whose email equals `email` exactly.
    async fn find_by_email(&self, email: &str) -> Result<Vec<UserRecord>, StoreError>;

    /// Write `record` under its id, replacing any record already stored there.
    ///
    /// Stores that enforce unique emails return [`StoreError::EmailTaken`]
    /// when a record with a different id already holds the same email.
    async fn create_user(&self, record: &UserRecord) -> Result<(), StoreError>;

    async fn get_user(&self, id: &str) -> Result<Option<UserRecord>, StoreError>;

    async fn list_users(&self) -> Result<Vec<UserRecord>, StoreError>;
}

/// True if `existing` holds `candidate`'s email under another id.
pub(crate) fn conflicts_with(existing: &UserRecord, candidate: &UserRecord) -> bool {
    existing.id != candidate.id && existing.email == candidate.email
}
