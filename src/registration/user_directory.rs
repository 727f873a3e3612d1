//! User Directory implementation on the local filesystem
//! Structure: {root}/users/{id}/profile.json

use crate::registration::error::StoreError;
use crate::registration::store::{conflicts_with, UserStore};
use crate::registration::user_record::UserRecord;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

const USERS_FOLDER: &str = "users";
const PROFILE_FILE: &str = "profile.json";

/// File-backed [`UserStore`]. Writes are serialized within one process only.
pub struct UserDirectory {
    root: PathBuf,
    unique_email: bool,
    write_lock: Mutex<()>,
}

impl UserDirectory {
    pub async fn open(root: impl Into<PathBuf>, unique_email: bool) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(root.join(USERS_FOLDER)).await?;

        info!(
            "UserDirectory initialized at: {} (unique_email={})",
            root.display(),
            unique_email
        );

        Ok(Self {
            root,
            unique_email,
            write_lock: Mutex::new(()),
        })
    }

    /// Get the folder holding a user's documents
    fn get_user_folder(&self, id: &str) -> PathBuf {
        self.root.join(USERS_FOLDER).join(id)
    }

    /// Get the profile path for a user
    fn get_profile_path(&self, id: &str) -> PathBuf {
        self.get_user_folder(id).join(PROFILE_FILE)
    }

    /// Ids become a single path component.
    fn validate_key(id: &str) -> Result<(), StoreError> {
        let unsafe_key = id.is_empty()
            || id == "."
            || id == ".."
            || id.contains(['/', '\\', '\0']);
        if unsafe_key {
            return Err(StoreError::InvalidKey(id.to_string()));
        }
        Ok(())
    }

    async fn get_user_by_path(&self, path: &Path) -> Result<Option<UserRecord>, StoreError> {
        match fs::read(path).await {
            Ok(content) => Ok(Some(serde_json::from_slice(&content)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn load_all(&self) -> Result<Vec<UserRecord>, StoreError> {
        let mut entries = fs::read_dir(self.root.join(USERS_FOLDER)).await?;
        let mut users = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_dir() {
                continue;
            }
            let profile_path = entry.path().join(PROFILE_FILE);
            match self.get_user_by_path(&profile_path).await {
                Ok(Some(user)) => users.push(user),
                Ok(None) => {}
                Err(e) => {
                    warn!("Skipping unreadable user file {}: {}", profile_path.display(), e);
                }
            }
        }

        Ok(users)
    }
}

#[async_trait]
impl UserStore for UserDirectory {
    async fn find_by_email(&self, email: &str) -> Result<Vec<UserRecord>, StoreError> {
        let mut users = self.load_all().await?;
        users.retain(|u| u.email == email);
        debug!("Found {} user(s) for email lookup", users.len());
        Ok(users)
    }

    async fn create_user(&self, record: &UserRecord) -> Result<(), StoreError> {
        Self::validate_key(&record.id)?;

        let _guard = self.write_lock.lock().await;

        if self.unique_email {
            let existing = self.load_all().await?;
            if existing.iter().any(|u| conflicts_with(u, record)) {
                return Err(StoreError::EmailTaken(record.email.clone()));
            }
        }

        let folder = self.get_user_folder(&record.id);
        fs::create_dir_all(&folder).await?;

        let json_content = serde_json::to_vec_pretty(record)?;
        let profile_path = self.get_profile_path(&record.id);
        let tmp_path = folder.join(format!(".{}.{}.tmp", PROFILE_FILE, Uuid::new_v4()));

        let written = match fs::write(&tmp_path, &json_content).await {
            Ok(()) => fs::rename(&tmp_path, &profile_path).await,
            Err(e) => Err(e),
        };
        if let Err(e) = written {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(e.into());
        }

        info!("Stored user '{}' at path: {}", record.id, profile_path.display());
        Ok(())
    }

    async fn get_user(&self, id: &str) -> Result<Option<UserRecord>, StoreError> {
        Self::validate_key(id)?;
        self.get_user_by_path(&self.get_profile_path(id)).await
    }

    async fn list_users(&self) -> Result<Vec<UserRecord>, StoreError> {
        self.load_all().await
    }
}
