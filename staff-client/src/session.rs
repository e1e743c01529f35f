//! Session store - persisted bearer token
//!
//! The token lives in a small key/value store under fixed keys so that it
//! survives restarts. It never expires on this side; expiry is only ever
//! detected through the server's "Unauthorized" answer.

use crate::error::ClientResult;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Key the bearer token is stored under
pub const TOKEN_KEY: &str = "token";

/// Key of the "remember me" flag set at login
pub const REMEMBER_ME_KEY: &str = "rememberMe";

/// Key of the username kept by the signup "remember me" box
pub const REMEMBERED_USERNAME_KEY: &str = "rememberedUsername";

/// Key/value storage holding the session
///
/// Injected into every component that reads or mutates the session so that
/// tests can swap in [`MemorySessionStore`].
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> ClientResult<()>;
    fn remove(&self, key: &str) -> ClientResult<()>;

    /// Returns the bearer token, if present.
    fn token(&self) -> Option<String> {
        self.get(TOKEN_KEY).filter(|t| !t.is_empty())
    }

    fn set_token(&self, token: &str) -> ClientResult<()> {
        self.set(TOKEN_KEY, token)
    }

    fn clear_token(&self) -> ClientResult<()> {
        self.remove(TOKEN_KEY)
    }

    /// Presence check only; the server may still reject the token.
    fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    fn remember_me(&self) -> bool {
        self.get(REMEMBER_ME_KEY).as_deref() == Some("true")
    }

    fn set_remember_me(&self, remember: bool) -> ClientResult<()> {
        if remember {
            self.set(REMEMBER_ME_KEY, "true")
        } else {
            self.remove(REMEMBER_ME_KEY)
        }
    }

    fn remembered_username(&self) -> Option<String> {
        self.get(REMEMBERED_USERNAME_KEY).filter(|u| !u.is_empty())
    }

    /// `None` forgets the stored name
    fn set_remembered_username(&self, username: Option<&str>) -> ClientResult<()> {
        match username {
            Some(username) => self.set(REMEMBERED_USERNAME_KEY, username),
            None => self.remove(REMEMBERED_USERNAME_KEY),
        }
    }
}

// ============================================================================
// In-memory store
// ============================================================================

/// Process-local store, lost on exit
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a token
    pub fn with_token(token: impl Into<String>) -> Self {
        let store = Self::new();
        store.entries.write().insert(TOKEN_KEY.to_string(), token.into());
        store
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        self.entries.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> ClientResult<()> {
        self.entries.write().remove(key);
        Ok(())
    }
}

// ============================================================================
// File-backed store
// ============================================================================

/// JSON file store, rewritten on every mutation
#[derive(Debug)]
pub struct FileSessionStore {
    file_path: PathBuf,
    entries: RwLock<BTreeMap<String, String>>,
}

impl FileSessionStore {
    /// Open the store at `path`; a missing file is an empty session
    pub fn open(path: impl AsRef<Path>) -> ClientResult<Self> {
        let file_path = path.as_ref().to_path_buf();

        let entries = if file_path.exists() {
            let content = std::fs::read_to_string(&file_path)?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content)?
            }
        } else {
            BTreeMap::new()
        };

        tracing::debug!(path = %file_path.display(), keys = entries.len(), "Session store opened");

        Ok(Self {
            file_path,
            entries: RwLock::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> ClientResult<()> {
        if let Some(parent) = self.file_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.file_path, content)?;
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        let mut entries = self.entries.write();
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries)
    }

    fn remove(&self, key: &str) -> ClientResult<()> {
        let mut entries = self.entries.write();
        if entries.remove(key).is_some() {
            self.save(&entries)?;
            tracing::debug!(key = %key, "Session entry removed");
        }
        Ok(())
    }
}
