//! Storage for the directory provider's API key.

use std::sync::{Mutex, PoisonError};

use thiserror::Error;

use crate::store::{KeyedFileStore, StoreError};

/// Key under which the API key is kept in the local store.
pub const CREDENTIAL_KEY: &str = "google_places_api_key";

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("API key must not be empty")]
    Empty,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A single persisted API key with explicit save/read/clear and no expiry.
pub trait CredentialStore: Send + Sync {
    /// Returns the saved key, or `None` when nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::Store`] if the backing storage fails.
    fn get(&self) -> Result<Option<String>, CredentialError>;

    /// Saves `credential` after trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::Empty`] for a blank key, or
    /// [`CredentialError::Store`] if the backing storage fails.
    fn save(&self, credential: &str) -> Result<(), CredentialError>;

    /// Removes the saved key.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::Store`] if the backing storage fails.
    fn clear(&self) -> Result<(), CredentialError>;
}

fn normalize(credential: &str) -> Result<&str, CredentialError> {
    let trimmed = credential.trim();
    if trimmed.is_empty() {
        return Err(CredentialError::Empty);
    }
    Ok(trimmed)
}

/// Masks all but the last four characters, e.g. `"********wxyz"`.
#[must_use]
pub fn mask_credential(credential: &str) -> String {
    let count = credential.chars().count();
    let visible = count.min(4);
    let tail: String = credential.chars().skip(count - visible).collect();
    format!("{}{tail}", "*".repeat(count - visible))
}

/// Credential store persisted in a [`KeyedFileStore`] under [`CREDENTIAL_KEY`].
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    store: KeyedFileStore,
}

impl FileCredentialStore {
    #[must_use]
    pub fn new(store: KeyedFileStore) -> Self {
        Self { store }
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self) -> Result<Option<String>, CredentialError> {
        Ok(self
            .store
            .get(CREDENTIAL_KEY)?
            .filter(|value| !value.is_empty()))
    }

    fn save(&self, credential: &str) -> Result<(), CredentialError> {
        let credential = normalize(credential)?;
        self.store.set(CREDENTIAL_KEY, credential)?;
        tracing::info!(path = %self.store.path().display(), "API key saved");
        Ok(())
    }

    fn clear(&self) -> Result<(), CredentialError> {
        self.store.remove(CREDENTIAL_KEY)?;
        tracing::info!(path = %self.store.path().display(), "API key cleared");
        Ok(())
    }
}

/// In-process credential store; nothing outlives the value.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    credential: Mutex<Option<String>>,
}

impl MemoryCredentialStore {
    #[must_use]
    pub fn with_credential(credential: &str) -> Self {
        Self {
            credential: Mutex::new(Some(credential.to_owned())),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self) -> Result<Option<String>, CredentialError> {
        Ok(self
            .credential
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save(&self, credential: &str) -> Result<(), CredentialError> {
        let credential = normalize(credential)?;
        *self
            .credential
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(credential.to_owned());
        Ok(())
    }

    fn clear(&self) -> Result<(), CredentialError> {
        *self
            .credential
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_store() -> (tempfile::TempDir, FileCredentialStore) {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileCredentialStore::new(KeyedFileStore::new(dir.path().join("store.json")));
        (dir, store)
    }

    #[test]
    fn file_store_save_then_get_round_trips() {
        let (_dir, store) = file_store();
        store.save("AIzaSyExampleKey123").unwrap();
        assert_eq!(store.get().unwrap().as_deref(), Some("AIzaSyExampleKey123"));
    }

    #[test]
    fn file_store_clear_then_get_is_absent() {
        let (_dir, store) = file_store();
        store.save("AIzaSyExampleKey123").unwrap();
        store.clear().unwrap();
        assert_eq!(store.get().unwrap(), None);
    }

    #[test]
    fn file_store_survives_reopen() {
        let (dir, store) = file_store();
        store.save("persisted").unwrap();
        let reopened =
            FileCredentialStore::new(KeyedFileStore::new(dir.path().join("store.json")));
        assert_eq!(reopened.get().unwrap().as_deref(), Some("persisted"));
    }

    #[test]
    fn save_trims_whitespace() {
        let store = MemoryCredentialStore::default();
        store.save("  key-with-spaces \n").unwrap();
        assert_eq!(store.get().unwrap().as_deref(), Some("key-with-spaces"));
    }

    #[test]
    fn save_rejects_blank_key() {
        let (_dir, store) = file_store();
        assert!(matches!(store.save("   "), Err(CredentialError::Empty)));
        assert_eq!(store.get().unwrap(), None);
    }

    #[test]
    fn memory_store_round_trip_and_clear() {
        let store = MemoryCredentialStore::default();
        assert_eq!(store.get().unwrap(), None);
        store.save("abc").unwrap();
        assert_eq!(store.get().unwrap().as_deref(), Some("abc"));
        store.clear().unwrap();
        assert_eq!(store.get().unwrap(), None);
    }

    #[test]
    fn mask_keeps_last_four_characters() {
        assert_eq!(mask_credential("AIzaSyABCDwxyz"), "**********wxyz");
        assert_eq!(mask_credential("abc"), "abc");
    }
}
