//! Durable storage for the session pair.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

use crate::error::{ClientError, Result};

/// The persisted pair, stored under fixed key names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedSession {
    #[serde(rename = "authToken", default)]
    pub auth_token: Option<String>,
    #[serde(rename = "isAdmin", default)]
    pub is_admin: bool,
}

/// Storage the [`SessionStore`](super::SessionStore) hydrates from and writes
/// through to.
pub trait SessionBackend: Send + Sync {
    /// Load the last saved pair. `None` means nothing was ever saved.
    fn load(&self) -> Result<Option<PersistedSession>>;

    fn save(&self, session: &PersistedSession) -> Result<()>;
}

/// In-memory backend for testing. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    slot: Arc<RwLock<Option<PersistedSession>>>,
    saves: Arc<AtomicUsize>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend that already holds a saved pair (simulates a restart).
    pub fn with_session(session: PersistedSession) -> Self {
        let backend = Self::new();
        *backend.slot.write().unwrap_or_else(PoisonError::into_inner) = Some(session);
        backend
    }

    pub fn snapshot(&self) -> Option<PersistedSession> {
        self.slot.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl SessionBackend for MemoryBackend {
    fn load(&self) -> Result<Option<PersistedSession>> {
        Ok(self.snapshot())
    }

    fn save(&self, session: &PersistedSession) -> Result<()> {
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = Some(session.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// JSON file backend. Survives process restarts.
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn storage_err(&self, source: std::io::Error) -> ClientError {
        ClientError::Storage {
            path: self.path.clone(),
            source,
        }
    }
}

impl SessionBackend for FileBackend {
    fn load(&self) -> Result<Option<PersistedSession>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No session file yet");
                return Ok(None);
            }
            Err(e) => return Err(self.storage_err(e)),
        };

        Ok(Some(serde_json::from_str(&contents)?))
    }

    fn save(&self, session: &PersistedSession) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.storage_err(e))?;
        }

        let json = serde_json::to_string_pretty(session)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json).map_err(|e| self.storage_err(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.storage_err(e))?;

        debug!(path = %self.path.display(), "Session persisted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Role, SessionStore};

    #[test]
    fn test_missing_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path().join("session.json"));
        assert_eq!(backend.load().unwrap(), None);
    }

    #[test]
    fn test_uses_fixed_key_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let backend = FileBackend::new(&path);
        backend
            .save(&PersistedSession {
                auth_token: Some("h.e.s".into()),
                is_admin: false,
            })
            .unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["authToken"], "h.e.s");
        assert_eq!(raw["isAdmin"], false);
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path().join("nested/deeper/session.json"));
        backend.save(&PersistedSession::default()).unwrap();
        assert_eq!(backend.load().unwrap(), Some(PersistedSession::default()));
    }

    #[test]
    fn test_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        {
            let store = SessionStore::open(FileBackend::new(&path));
            store.set_credential("opaque-token").unwrap();
        }

        let reopened = SessionStore::open(FileBackend::new(&path));
        assert_eq!(reopened.get().credential.as_deref(), Some("opaque-token"));
        assert_eq!(reopened.get().role, Role::Member);
    }

    #[test]
    fn test_unwritable_path_keeps_memory_and_returns_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();
        let path = blocker.join("session.json");

        let store = SessionStore::open(FileBackend::new(&path));

        let err = store.set_credential("a.b.c").unwrap_err();
        assert!(matches!(&err, ClientError::Storage { path: p, .. } if *p == path));
        assert_eq!(store.get().credential.as_deref(), Some("a.b.c"));
        assert_eq!(store.get().role, Role::Member);

        assert!(matches!(store.clear(), Err(ClientError::Storage { .. })));
        assert_eq!(store.get().credential, None);
        assert_eq!(store.get().role, Role::Anonymous);
    }

    #[test]
    fn test_corrupt_file_is_an_error_but_store_opens_anonymous() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{not json").unwrap();

        let backend = FileBackend::new(&path);
        assert!(matches!(backend.load(), Err(ClientError::Serialization(_))));

        let store = SessionStore::open(backend);
        assert_eq!(store.get().role, Role::Anonymous);
    }
}
