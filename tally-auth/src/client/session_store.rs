use crate::common::{Session, StoredSession};
use crate::error::AuthError;
use std::fs;
use std::path::PathBuf;

const SESSION_FILE: &str = "session.json";

/// Persists the signed-in session as owner-only JSON in the cache directory.
pub struct SessionStore {
    session_path: PathBuf,
}

impl SessionStore {
    pub fn new() -> Result<Self, AuthError> {
        Self::with_dir(Self::get_cache_dir()?)
    }

    pub fn with_dir(cache_dir: PathBuf) -> Result<Self, AuthError> {
        if !cache_dir.exists() {
            fs::create_dir_all(&cache_dir).map_err(|e| {
                AuthError::SessionStorage(format!("Failed to create cache directory: {}", e))
            })?;
        }

        Ok(Self {
            session_path: cache_dir.join(SESSION_FILE),
        })
    }

    fn get_cache_dir() -> Result<PathBuf, AuthError> {
        dirs::cache_dir()
            .map(|dir| dir.join("tally"))
            .ok_or_else(|| AuthError::SessionStorage("Could not find cache directory".into()))
    }

    pub fn save(&self, session: &Session) -> Result<(), AuthError> {
        let json = serde_json::to_string_pretty(&StoredSession::from(session))?;

        fs::write(&self.session_path, json)
            .map_err(|e| AuthError::SessionStorage(format!("Failed to save session: {}", e)))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(&self.session_path)
                .map_err(|e| {
                    AuthError::SessionStorage(format!("Failed to get file permissions: {}", e))
                })?
                .permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&self.session_path, perms).map_err(|e| {
                AuthError::SessionStorage(format!("Failed to set file permissions: {}", e))
            })?;
        }

        tracing::debug!("Saved session for {}", session.user_id);
        Ok(())
    }

    pub fn load(&self) -> Result<Option<Session>, AuthError> {
        if !self.session_path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&self.session_path)
            .map_err(|e| AuthError::SessionStorage(format!("Failed to read session: {}", e)))?;

        let stored: StoredSession = serde_json::from_str(&json)?;
        if stored.user_id.is_empty() || stored.token.is_empty() {
            return Ok(None);
        }
        Ok(Some(stored.into()))
    }

    /// Clears user and token together.
    pub fn delete(&self) -> Result<(), AuthError> {
        if self.session_path.exists() {
            fs::remove_file(&self.session_path).map_err(|e| {
                AuthError::SessionStorage(format!("Failed to delete session: {}", e))
            })?;
            tracing::info!("Session cleared");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_round_trip_and_delete() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::with_dir(dir.path().to_path_buf()).unwrap();

        assert!(store.load().unwrap().is_none());

        store
            .save(&Session::new("me@example.com", "secret-token"))
            .unwrap();
        let loaded = store.load().unwrap().expect("session should exist");
        assert_eq!(loaded.user_id, "me@example.com");
        assert_eq!(loaded.token.expose_secret(), "secret-token");

        store.delete().unwrap();
        assert!(store.load().unwrap().is_none());
        // Deleting twice is fine
        store.delete().unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_session_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::with_dir(dir.path().to_path_buf()).unwrap();
        store.save(&Session::new("me@example.com", "t")).unwrap();

        let mode = fs::metadata(dir.path().join(SESSION_FILE))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_blank_session_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(SESSION_FILE),
            r#"{"user_id": "", "token": "", "signed_in_at": 0}"#,
        )
        .unwrap();
        let store = SessionStore::with_dir(dir.path().to_path_buf()).unwrap();
        assert!(store.load().unwrap().is_none());
    }
}
