//! Credential storage for the access token
//!
//! The [`CredentialStore`] trait is the only read/write point for the current
//! [`AccessCredential`]. Two implementations ship with the crate:
//!
//! - [`MemoryCredentialStore`] keeps the token for the lifetime of the process
//! - [`FileCredentialStore`] persists it as JSON, one file per API origin, so a
//!   restarted process picks the session back up

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::types::AccessCredential;
use crate::utils::origin_slug;

/// Fixed key the token is stored under
pub const ACCESS_TOKEN_KEY: &str = "accessToken";

/// Errors that can occur during credential storage operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// I/O error during storage operations
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Single read/write point for the access credential
pub trait CredentialStore: Send + Sync {
    /// Current credential, or `None` when unauthenticated
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read.
    fn read(&self) -> Result<Option<AccessCredential>, StoreError>;

    /// Persist a credential, overwriting any previous one
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn write(&self, credential: &AccessCredential) -> Result<(), StoreError>;

    /// Remove the stored credential
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage exists but cannot be removed.
    fn clear(&self) -> Result<(), StoreError>;
}

/// Shared, type-erased credential store
pub type SharedCredentialStore = Arc<dyn CredentialStore>;

// ============================================================================
// In-memory store
// ============================================================================

/// Process-local credential store
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    slot: Mutex<Option<AccessCredential>>,
}

impl MemoryCredentialStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store already holding a credential
    #[must_use]
    pub fn with_credential(credential: AccessCredential) -> Self {
        Self {
            slot: Mutex::new(Some(credential)),
        }
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<AccessCredential>> {
        self.slot.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn read(&self) -> Result<Option<AccessCredential>, StoreError> {
        Ok(self.slot().clone())
    }

    fn write(&self, credential: &AccessCredential) -> Result<(), StoreError> {
        *self.slot() = Some(credential.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        *self.slot() = None;
        Ok(())
    }
}

// ============================================================================
// File-backed store
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
struct StoredCredential {
    #[serde(rename = "accessToken")]
    access_token: AccessCredential,
}

/// Credential store persisted to a JSON file
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    storage_path: PathBuf,
}

impl FileCredentialStore {
    /// Store scoped to an API origin, under the platform config directory.
    ///
    /// `http://localhost:8080/` and `http://localhost:8080/api` share a file;
    /// a different host or port gets its own.
    #[must_use]
    pub fn for_origin(base_url: &str) -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("storefront-client");

        Self {
            storage_path: config_dir.join(format!("{}.json", origin_slug(base_url))),
        }
    }

    /// Create credential storage with custom path
    #[must_use]
    pub fn with_path(path: PathBuf) -> Self {
        Self { storage_path: path }
    }

    /// Get the storage path
    #[must_use]
    pub fn path(&self) -> &PathBuf {
        &self.storage_path
    }
}

impl CredentialStore for FileCredentialStore {
    fn read(&self) -> Result<Option<AccessCredential>, StoreError> {
        if !self.storage_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.storage_path)?;
        let stored: StoredCredential = serde_json::from_str(&content)?;

        Ok(Some(stored.access_token))
    }

    fn write(&self, credential: &AccessCredential) -> Result<(), StoreError> {
        if let Some(parent) = self.storage_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(&StoredCredential {
            access_token: credential.clone(),
        })?;
        std::fs::write(&self.storage_path, &content)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&self.storage_path, perms)?;
        }

        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        if self.storage_path.exists() {
            std::fs::remove_file(&self.storage_path)?;
        }
        Ok(())
    }
}
