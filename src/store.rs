//! Credential Storage
//!
//! Storage for the bearer credential, injected into the client as an explicit
//! capability.

use crate::error::Result;
use parking_lot::RwLock;
use std::path::PathBuf;

/// Well-known name under which the credential is stored
pub const STORED_CREDENTIAL_KEY: &str = "cerebras_api_key";

/// Key-value persistence surface for the bearer credential
pub trait CredentialStore: Send + Sync {
    /// Read the stored credential. A missing or unreadable value is `None`.
    fn get(&self) -> Option<String>;

    /// Store a credential, replacing any previous one.
    fn set(&self, credential: &str) -> Result<()>;

    /// Remove the stored credential.
    fn clear(&self) -> Result<()>;
}

/// In-memory store for tests and embedding
#[derive(Debug, Default)]
pub struct MemoryStore {
    credential: RwLock<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding an initial credential.
    pub fn with_credential(credential: impl Into<String>) -> Self {
        Self {
            credential: RwLock::new(Some(credential.into())),
        }
    }
}

impl CredentialStore for MemoryStore {
    fn get(&self) -> Option<String> {
        self.credential.read().clone()
    }

    fn set(&self, credential: &str) -> Result<()> {
        *self.credential.write() = Some(credential.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.credential.write() = None;
        Ok(())
    }
}

/// File-backed store keeping the credential in a single file under the user
/// config directory
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store at the default location
    /// (`<config dir>/agentry/cerebras_api_key`).
    pub fn new() -> Self {
        let dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("agentry");
        Self {
            path: dir.join(STORED_CREDENTIAL_KEY),
        }
    }

    /// Create a store backed by a specific file.
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for FileStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialStore for FileStore {
    fn get(&self) -> Option<String> {
        let content = std::fs::read_to_string(&self.path).ok()?;
        let credential = content.trim();
        if credential.is_empty() {
            None
        } else {
            Some(credential.to_string())
        }
    }

    fn set(&self, credential: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, credential)?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert_eq!(store.get(), None);

        store.set("csk-test-key").unwrap();
        assert_eq!(store.get(), Some("csk-test-key".to_string()));

        store.set("csk-other-key").unwrap();
        assert_eq!(store.get(), Some("csk-other-key".to_string()));

        store.clear().unwrap();
        assert_eq!(store.get(), None);
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::at_path(dir.path().join(STORED_CREDENTIAL_KEY));

        assert_eq!(store.get(), None);

        store.set("csk-test-key").unwrap();
        assert_eq!(store.get(), Some("csk-test-key".to_string()));

        store.clear().unwrap();
        assert_eq!(store.get(), None);

        // Clearing an already-empty store is fine
        store.clear().unwrap();
    }

    #[test]
    fn test_file_store_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::at_path(dir.path().join("nested").join("key"));

        store.set("csk-test-key").unwrap();
        assert_eq!(store.get(), Some("csk-test-key".to_string()));
    }

    #[test]
    fn test_file_store_empty_file_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(STORED_CREDENTIAL_KEY);
        std::fs::write(&path, "  \n").unwrap();

        let store = FileStore::at_path(path);
        assert_eq!(store.get(), None);
    }
}
