//! Session persistence.
//!
//! The signed-in user is stored as one JSON record under the key [`SESSION_KEY`]. A record
//! that cannot be parsed is treated as "no session" and removed.

use crate::auth::client::AuthClient;
use crate::auth::error::{AuthError, SessionError};
use crate::types::User;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tokio::sync::RwLock;

/// Key of the session record
pub const SESSION_KEY: &str = "user";

/// Key/value storage for the session record
pub trait SessionStorage: Send + Sync {
    /// Read the raw value under `key`
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, SessionError>;

    /// Write the raw value under `key`
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), SessionError>;

    /// Remove `key`; removing a missing key is not an error
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), SessionError>;
}

/// One file per key inside a directory
#[derive(Clone, Debug)]
pub struct FileSessionStorage {
    dir: PathBuf,
}

impl FileSessionStorage {
    /// Store records under `dir`, created on first write
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl SessionStorage for FileSessionStorage {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        match std::fs::read_to_string(self.path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        match std::fs::remove_file(self.path(key)) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

/// In-memory storage
#[derive(Clone, Debug, Default)]
pub struct MemorySessionStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemorySessionStorage {
    /// Create empty storage
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemorySessionStorage {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        let entries = self.entries.lock().map_err(|_| SessionError::LockPoisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        let mut entries = self.entries.lock().map_err(|_| SessionError::LockPoisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        let mut entries = self.entries.lock().map_err(|_| SessionError::LockPoisoned)?;
        entries.remove(key);
        Ok(())
    }
}

/// Failure of [`SessionManager::login`]
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    /// The backend refused the credentials
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The session could not be persisted
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Owns the current user and its persisted record
///
/// Created once at startup and shared through the server state.
pub struct SessionManager {
    storage: Arc<dyn SessionStorage>,
    current: RwLock<Option<User>>,
}

impl SessionManager {
    /// Create a manager with no user loaded
    #[must_use]
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self {
            storage,
            current: RwLock::new(None),
        }
    }

    /// Load the persisted user, if any
    ///
    /// A corrupt record is removed and yields `None`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if the storage cannot be read.
    pub async fn restore(&self) -> Result<Option<User>, SessionError> {
        let user = match self.storage.get(SESSION_KEY)? {
            None => None,
            Some(raw) => match serde_json::from_str::<User>(&raw) {
                Ok(user) => Some(user),
                Err(error) => {
                    tracing::warn!(%error, "Discarding unreadable session record");
                    self.storage.remove(SESSION_KEY)?;
                    None
                },
            },
        };

        if let Some(user) = &user {
            tracing::info!(user_id = %user.id, "Session restored");
        }
        (*self.current.write().await).clone_from(&user);
        Ok(user)
    }

    /// Authenticate through `auth` and persist the user
    ///
    /// # Errors
    ///
    /// Returns [`LoginError::Auth`] if authentication fails, [`LoginError::Session`] if
    /// the session cannot be stored.
    pub async fn login(
        &self,
        auth: &dyn AuthClient,
        email: &str,
        password: &str,
    ) -> Result<User, LoginError> {
        let user = auth.login(email, password).await?;
        self.storage.set(SESSION_KEY, &serde_json::to_string(&user).map_err(SessionError::from)?)?;
        *self.current.write().await = Some(user.clone());
        tracing::info!(user_id = %user.id, backend = auth.name(), "User logged in");
        Ok(user)
    }

    /// Clear the user and its record
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if the record cannot be removed.
    pub async fn logout(&self) -> Result<(), SessionError> {
        let previous = self.current.write().await.take();
        self.storage.remove(SESSION_KEY)?;
        if let Some(user) = previous {
            tracing::info!(user_id = %user.id, "User logged out");
        }
        Ok(())
    }

    /// The signed-in user
    pub async fn current(&self) -> Option<User> {
        self.current.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::auth::client::{DEMO_EMAIL, DEMO_PASSWORD, MockAuthClient};
    use std::time::Duration;

    fn manager() -> (SessionManager, MemorySessionStorage) {
        let storage = MemorySessionStorage::new();
        (SessionManager::new(Arc::new(storage.clone())), storage)
    }

    #[tokio::test]
    async fn test_login_persists_user() {
        let (sessions, storage) = manager();
        let auth = MockAuthClient::new(Duration::ZERO);

        let user = sessions.login(&auth, DEMO_EMAIL, DEMO_PASSWORD).await.unwrap();

        assert_eq!(sessions.current().await, Some(user.clone()));
        let raw = storage.get(SESSION_KEY).unwrap().unwrap();
        assert_eq!(serde_json::from_str::<User>(&raw).unwrap(), user);
    }

    #[tokio::test]
    async fn test_failed_login_keeps_no_session() {
        let (sessions, storage) = manager();
        let auth = MockAuthClient::new(Duration::ZERO);

        let result = sessions.login(&auth, DEMO_EMAIL, "nope").await;

        assert!(matches!(result, Err(LoginError::Auth(AuthError::InvalidCredentials))));
        assert_eq!(sessions.current().await, None);
        assert_eq!(storage.get(SESSION_KEY).unwrap(), None);
    }

    #[tokio::test]
    async fn test_restore_round_trips_through_storage() {
        let (sessions, storage) = manager();
        let auth = MockAuthClient::new(Duration::ZERO);
        let user = sessions.login(&auth, DEMO_EMAIL, DEMO_PASSWORD).await.unwrap();

        let restarted = SessionManager::new(Arc::new(storage));
        assert_eq!(restarted.restore().await.unwrap(), Some(user));
    }

    #[tokio::test]
    async fn test_corrupt_record_is_removed() {
        let (sessions, storage) = manager();
        storage.set(SESSION_KEY, "{not json").unwrap();

        assert_eq!(sessions.restore().await.unwrap(), None);
        assert_eq!(storage.get(SESSION_KEY).unwrap(), None);
    }

    #[tokio::test]
    async fn test_logout_clears_record() {
        let (sessions, storage) = manager();
        let auth = MockAuthClient::new(Duration::ZERO);
        sessions.login(&auth, DEMO_EMAIL, DEMO_PASSWORD).await.unwrap();

        sessions.logout().await.unwrap();

        assert_eq!(sessions.current().await, None);
        assert_eq!(storage.get(SESSION_KEY).unwrap(), None);
    }

    #[test]
    fn test_file_storage() {
        let dir = std::env::temp_dir().join(format!("storefront-session-{}", std::process::id()));
        let storage = FileSessionStorage::new(&dir);

        assert_eq!(storage.get(SESSION_KEY).unwrap(), None);
        storage.set(SESSION_KEY, "{}").unwrap();
        assert_eq!(storage.get(SESSION_KEY).unwrap().as_deref(), Some("{}"));
        storage.remove(SESSION_KEY).unwrap();
        storage.remove(SESSION_KEY).unwrap();
        assert_eq!(storage.get(SESSION_KEY).unwrap(), None);

        let _ = std::fs::remove_dir_all(dir);
    }
}
