//! Preference store trait abstraction.
//!
//! A small durable key/value string store for per-user settings such as the
//! persisted debug flag. Implementations include the file-backed store and an
//! in-memory store for tests.

/// Preference store operation errors.
#[derive(Debug, Clone, PartialEq)]
pub enum PreferenceError {
    /// Failed to read the backing store
    ReadFailed(String),
    /// Failed to write the backing store
    WriteFailed(String),
    /// Stored data could not be parsed
    Serialization(String),
}

impl std::fmt::Display for PreferenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PreferenceError::ReadFailed(msg) => write!(f, "Failed to read preferences: {}", msg),
            PreferenceError::WriteFailed(msg) => {
                write!(f, "Failed to write preferences: {}", msg)
            }
            PreferenceError::Serialization(msg) => {
                write!(f, "Preference serialization error: {}", msg)
            }
        }
    }
}

impl std::error::Error for PreferenceError {}

/// Trait for durable preference storage.
///
/// Reads happen on every intercepted request, so implementations should keep
/// `get` cheap.
pub trait PreferenceStore: Send + Sync {
    /// Read a value.
    ///
    /// # Returns
    /// - `Ok(Some(value))` if the key is set
    /// - `Ok(None)` if it is not
    /// - `Err(error)` if the store could not be read
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError>;

    /// Remove a key. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), PreferenceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preference_error_display() {
        assert_eq!(
            PreferenceError::ReadFailed("denied".to_string()).to_string(),
            "Failed to read preferences: denied"
        );
        assert_eq!(
            PreferenceError::WriteFailed("disk full".to_string()).to_string(),
            "Failed to write preferences: disk full"
        );
        assert_eq!(
            PreferenceError::Serialization("eof".to_string()).to_string(),
            "Preference serialization error: eof"
        );
    }
}
