//! Key/value preference storage backed by a small JSON file.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::error::ThemeError;

/// Persistent string preferences.
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, ThemeError>;
    fn set(&self, key: &str, value: &str) -> Result<(), ThemeError>;
}

/// Preferences stored as a JSON object in a single file.
///
/// A missing file reads as empty. A file that is not a JSON object is also
/// treated as empty and overwritten on the next `set`.
pub struct FilePreferenceStore {
    path: PathBuf,
    // Serializes read-modify-write cycles.
    lock: Mutex<()>,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, ThemeError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(ThemeError::Read {
                    path: self.path.display().to_string(),
                    source,
                });
            }
        };
        match serde_json::from_str(&raw) {
            Ok(map) => Ok(map),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "Ignoring unreadable preferences: {e}");
                Ok(BTreeMap::new())
            }
        }
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, ThemeError> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ThemeError> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut prefs = self.read_all()?;
        prefs.insert(key.to_string(), value.to_string());

        let write_err = |source: std::io::Error| ThemeError::Write {
            path: self.path.display().to_string(),
            source,
        };
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        let json = serde_json::to_string_pretty(&prefs).map_err(|e| write_err(e.into()))?;
        std::fs::write(&self.path, json).map_err(write_err)
    }
}

/// In-process store, used when no theme file is configured.
#[derive(Default)]
pub struct MemoryPreferenceStore {
    prefs: Mutex<BTreeMap<String, String>>,
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, ThemeError> {
        Ok(self
            .prefs
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(key)
            .cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ThemeError> {
        self.prefs
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// File-backed store when a path is configured, in-memory otherwise.
pub fn open_store(path: Option<PathBuf>) -> Arc<dyn PreferenceStore> {
    match path {
        Some(path) => Arc::new(FilePreferenceStore::new(path)),
        None => Arc::new(MemoryPreferenceStore::default()),
    }
}
