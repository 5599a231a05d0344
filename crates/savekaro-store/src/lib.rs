//! Client-side persistence for SaveKaro.
//!
//! Two scopes mirror a browser's storage: **local** state survives restarts
//! (signed-in user, token, guest favorites), **session** state lives as long
//! as the process (whether the login prompt has been shown).
//!
//! # Example
//!
//! ```rust,ignore
//! use savekaro_store::{keys, ClientStorage, StoreExt};
//!
//! let storage = ClientStorage::open_dir(".savekaro")?;
//! storage.local().set_json(keys::FAVORITES, &["p1", "p2"])?;
//! ```

mod error;
mod kv;

pub use error::StoreError;
pub use kv::{FileStore, KeyValueStore, MemoryStore, StoreExt};

use std::path::Path;
use std::sync::Arc;

/// Keys persisted by the storefront.
pub mod keys {
    /// JSON-encoded signed-in user (local scope).
    pub const USER: &str = "user";
    /// Bearer token (local scope).
    pub const TOKEN: &str = "token";
    /// JSON array of favorited product ids for guests (local scope).
    pub const FAVORITES: &str = "favorites";
    /// Set once the login prompt has been shown (session scope).
    pub const AUTH_POPUP_SHOWN: &str = "hasShownAuthPopup";
}

/// File name of the local-scope store inside the storage directory.
pub const LOCAL_STORE_FILE: &str = "local.json";

/// The local and session scopes, shared by everything that persists state.
#[derive(Clone)]
pub struct ClientStorage {
    local: Arc<dyn KeyValueStore>,
    session: Arc<dyn KeyValueStore>,
}

impl ClientStorage {
    pub fn new(local: Arc<dyn KeyValueStore>, session: Arc<dyn KeyValueStore>) -> Self {
        Self { local, session }
    }

    /// Both scopes in memory.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()), Arc::new(MemoryStore::new()))
    }

    /// Local scope backed by `<dir>/local.json`, session scope in memory.
    pub fn open_dir(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let local = FileStore::open(dir.as_ref().join(LOCAL_STORE_FILE))?;
        Ok(Self::new(Arc::new(local), Arc::new(MemoryStore::new())))
    }

    pub fn local(&self) -> &dyn KeyValueStore {
        self.local.as_ref()
    }

    pub fn session(&self) -> &dyn KeyValueStore {
        self.session.as_ref()
    }
}

impl std::fmt::Debug for ClientStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientStorage").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scopes_are_independent() {
        let storage = ClientStorage::in_memory();
        storage.session().set(keys::AUTH_POPUP_SHOWN, "true").unwrap();
        assert!(storage.local().get(keys::AUTH_POPUP_SHOWN).unwrap().is_none());
    }

    #[test]
    fn test_open_dir_persists_local_scope_only() {
        let dir = tempfile::tempdir().unwrap();
        {
            let storage = ClientStorage::open_dir(dir.path()).unwrap();
            storage.local().set(keys::TOKEN, "jwt").unwrap();
            storage.session().set(keys::AUTH_POPUP_SHOWN, "true").unwrap();
        }
        let storage = ClientStorage::open_dir(dir.path()).unwrap();
        assert_eq!(storage.local().get(keys::TOKEN).unwrap().as_deref(), Some("jwt"));
        assert!(storage.session().get(keys::AUTH_POPUP_SHOWN).unwrap().is_none());
    }
}
