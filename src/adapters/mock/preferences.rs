//! In-memory preference store.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::traits::{PreferenceError, PreferenceStore};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// In-memory preference store.
///
/// Also the fallback store when there is no home directory.
///
/// Clones share the same map. `fail_reads`/`fail_writes` simulate a broken
/// backing store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPreferences {
    values: Arc<Mutex<HashMap<String, String>>>,
    fail_reads: Arc<Mutex<bool>>,
    fail_writes: Arc<Mutex<bool>>,
}

impl InMemoryPreferences {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with one value already set.
    pub fn with_value(key: &str, value: &str) -> Self {
        let store = Self::new();
        lock(&store.values).insert(key.to_string(), value.to_string());
        store
    }

    /// Make every subsequent read fail.
    pub fn set_fail_reads(&self, fail: bool) {
        *lock(&self.fail_reads) = fail;
    }

    /// Make every subsequent write fail.
    pub fn set_fail_writes(&self, fail: bool) {
        *lock(&self.fail_writes) = fail;
    }
}

impl PreferenceStore for InMemoryPreferences {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        if *lock(&self.fail_reads) {
            return Err(PreferenceError::ReadFailed("simulated read failure".to_string()));
        }
        Ok(lock(&self.values).get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        if *lock(&self.fail_writes) {
            return Err(PreferenceError::WriteFailed("simulated write failure".to_string()));
        }
        lock(&self.values).insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), PreferenceError> {
        if *lock(&self.fail_writes) {
            return Err(PreferenceError::WriteFailed("simulated write failure".to_string()));
        }
        lock(&self.values).remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let prefs = InMemoryPreferences::new();
        prefs.set("DEBUG_PANEL", "1").unwrap();
        assert_eq!(prefs.get("DEBUG_PANEL").unwrap(), Some("1".to_string()));
    }

    #[test]
    fn test_clones_share_state() {
        let prefs = InMemoryPreferences::with_value("DEBUG_PANEL", "1");
        let cloned = prefs.clone();
        cloned.remove("DEBUG_PANEL").unwrap();
        assert_eq!(prefs.get("DEBUG_PANEL").unwrap(), None);
    }

    #[test]
    fn test_simulated_failures() {
        let prefs = InMemoryPreferences::new();
        prefs.set_fail_reads(true);
        prefs.set_fail_writes(true);
        assert!(prefs.get("k").is_err());
        assert!(prefs.set("k", "v").is_err());
        assert!(prefs.remove("k").is_err());
    }
}
