//! In-memory user store

use crate::registration::error::StoreError;
use crate::registration::store::{conflicts_with, UserStore};
use crate::registration::user_record::UserRecord;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

pub struct MemoryUserStore {
    users: RwLock<HashMap<String, UserRecord>>,
    unique_email: bool,
}

impl MemoryUserStore {
    pub fn new(unique_email: bool) -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            unique_email,
        }
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

impl Default for MemoryUserStore {
    fn default() -> Self {
        Self::new(true)
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Vec<UserRecord>, StoreError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .filter(|u| u.email == email)
            .cloned()
            .collect())
    }

    async fn create_user(&self, record: &UserRecord) -> Result<(), StoreError> {
        // Check and insert under one write guard.
        let mut users = self.users.write().await;

        if self.unique_email && users.values().any(|u| conflicts_with(u, record)) {
            return Err(StoreError::EmailTaken(record.email.clone()));
        }

        users.insert(record.id.clone(), record.clone());
        Ok(())
    }

    async fn get_user(&self, id: &str) -> Result<Option<UserRecord>, StoreError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn list_users(&self) -> Result<Vec<UserRecord>, StoreError> {
        Ok(self.users.read().await.values().cloned().collect())
    }
}
