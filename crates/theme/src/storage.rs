//! Key-value persistence for the active selection and user-authored themes.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::ThemeConfig;

/// Key holding the id of the active theme.
pub const CURRENT_THEME_KEY: &str = "swatch:current-theme";

/// Key holding a JSON array of user-authored themes.
pub const USER_THEMES_KEY: &str = "swatch:custom-themes";

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// A JSON object on disk, rewritten on every change.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let entries = if path.exists() {
            let content = fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content)?
            }
        } else {
            BTreeMap::new()
        };
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

/// Read user-authored themes. A missing or unreadable list is empty.
pub fn load_user_themes(store: &impl KeyValueStore) -> Vec<ThemeConfig> {
    let Some(raw) = store.get(USER_THEMES_KEY) else {
        return Vec::new();
    };
    match serde_json::from_str(&raw) {
        Ok(themes) => themes,
        Err(e) => {
            warn!(error = %e, "Ignoring unreadable user theme list");
            Vec::new()
        }
    }
}

pub fn save_user_themes(
    store: &mut impl KeyValueStore,
    themes: &[ThemeConfig],
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(themes)?;
    store.set(USER_THEMES_KEY, &raw)
}

/// Insert or replace a user theme by id.
pub fn upsert_user_theme(
    store: &mut impl KeyValueStore,
    theme: ThemeConfig,
) -> Result<(), StorageError> {
    let mut themes = load_user_themes(store);
    match themes.iter_mut().find(|t| t.id == theme.id) {
        Some(existing) => *existing = theme,
        None => themes.push(theme),
    }
    save_user_themes(store, &themes)
}

/// Remove a user theme by id. Returns whether it was present.
pub fn remove_user_theme(
    store: &mut impl KeyValueStore,
    id: &str,
) -> Result<bool, StorageError> {
    let mut themes = load_user_themes(store);
    let before = themes.len();
    themes.retain(|t| t.id != id);
    if themes.len() == before {
        return Ok(false);
    }
    save_user_themes(store, &themes)?;
    Ok(true)
}
