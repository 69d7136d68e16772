use crate::ui::theme::ThemeMode;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

const FILE_NAME: &str = "preferences.json";

#[derive(Debug, Error)]
pub enum PreferencesError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("No configuration directory available")]
    NoConfigDir,
}

/// UI preferences that survive restarts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub theme: ThemeMode,
    pub sidebar_open: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: ThemeMode::default(),
            sidebar_open: true,
        }
    }
}

/// Async JSON store for [`Preferences`] using tokio::fs.
#[derive(Debug, Clone)]
pub struct PreferencesStore {
    dir: PathBuf,
}

impl PreferencesStore {
    /// Store under `<config_dir>/tally`.
    pub fn new() -> Result<Self, PreferencesError> {
        let dir = dirs::config_dir()
            .ok_or(PreferencesError::NoConfigDir)?
            .join("tally");
        Ok(Self { dir })
    }

    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(FILE_NAME)
    }

    /// `None` when nothing has been saved yet.
    pub async fn load(&self) -> Result<Option<Preferences>, PreferencesError> {
        let path = self.path();
        if !fs::try_exists(&path).await? {
            return Ok(None);
        }

        let data = fs::read_to_string(&path).await?;
        Ok(Some(serde_json::from_str(&data)?))
    }

    pub async fn save(&self, preferences: &Preferences) -> Result<(), PreferencesError> {
        fs::create_dir_all(&self.dir).await?;
        let json = serde_json::to_string_pretty(preferences)?;
        write_atomically(&self.path(), json.as_bytes()).await
    }
}

async fn write_atomically(path: &Path, contents: &[u8]) -> Result<(), PreferencesError> {
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, contents).await?;
    fs::rename(&tmp, path).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_file_loads_none() {
        let dir = TempDir::new().unwrap();
        let store = PreferencesStore::with_dir(dir.path());
        assert_eq!(store.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = PreferencesStore::with_dir(dir.path().join("nested"));
        let preferences = Preferences {
            theme: ThemeMode::Light,
            sidebar_open: false,
        };

        store.save(&preferences).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(preferences));

        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\"light\""));
    }

    #[tokio::test]
    async fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let store = PreferencesStore::with_dir(dir.path());
        std::fs::write(store.path(), r#"{"theme":"light"}"#).unwrap();

        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded.theme, ThemeMode::Light);
        assert!(loaded.sidebar_open);
    }
}
