//! File-based preference store adapter.
//!
//! Preferences live in a single JSON object at `~/.toolcat/preferences.json`.
//! The file is re-read on every `get`, so edits from another process take
//! effect on the next intercepted request.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::traits::{PreferenceError, PreferenceStore};

/// The application data directory name.
pub const DATA_DIR: &str = ".toolcat";

/// The preferences file name.
const PREFERENCES_FILE: &str = "preferences.json";

/// File-backed preference store.
#[derive(Debug)]
pub struct FilePreferences {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FilePreferences {
    /// Create a store at the default location.
    ///
    /// Returns `None` if the home directory cannot be determined.
    pub fn new() -> Option<Self> {
        let home = dirs::home_dir()?;
        Some(Self::at(home.join(DATA_DIR).join(PREFERENCES_FILE)))
    }

    /// Create a store backed by a specific file.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Path to the preferences file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, PreferenceError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let file = File::open(&self.path).map_err(|e| PreferenceError::ReadFailed(e.to_string()))?;
        serde_json::from_reader(BufReader::new(file))
            .map_err(|e| PreferenceError::Serialization(e.to_string()))
    }

    fn store(&self, values: &BTreeMap<String, String>) -> Result<(), PreferenceError> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)
                    .map_err(|e| PreferenceError::WriteFailed(e.to_string()))?;
            }
        }
        let file =
            File::create(&self.path).map_err(|e| PreferenceError::WriteFailed(e.to_string()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, values)
            .map_err(|e| PreferenceError::Serialization(e.to_string()))?;
        writer
            .flush()
            .map_err(|e| PreferenceError::WriteFailed(e.to_string()))
    }

    fn update<F>(&self, apply: F) -> Result<(), PreferenceError>
    where
        F: FnOnce(&mut BTreeMap<String, String>),
    {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| PreferenceError::WriteFailed("preference lock poisoned".to_string()))?;
        let mut values = self.load().unwrap_or_default();
        apply(&mut values);
        self.store(&values)
    }
}

impl PreferenceStore for FilePreferences {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(self.load()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.update(|values| {
            values.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<(), PreferenceError> {
        self.update(|values| {
            values.remove(key);
        })
    }
}
