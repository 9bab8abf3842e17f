//! Debug-enabled flag.
//!
//! The flag is on when the application was launched in debug mode or when the
//! persisted `DEBUG_PANEL` preference is `"1"`. It is re-evaluated on every
//! intercepted request so a toggle applies to the very next call.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::traits::PreferenceStore;

/// Preference key holding the persisted flag.
pub const DEBUG_PREFERENCE_KEY: &str = "DEBUG_PANEL";

/// Process-wide debug flag backed by a preference store.
pub struct DebugState {
    launch_flag: bool,
    preferences: Arc<dyn PreferenceStore>,
    active: AtomicBool,
}

impl DebugState {
    /// Create the flag. `launch_flag` is the launch-time debug switch.
    pub fn new(launch_flag: bool, preferences: Arc<dyn PreferenceStore>) -> Self {
        let state = Self {
            launch_flag,
            preferences,
            active: AtomicBool::new(false),
        };
        state.is_enabled();
        state
    }

    /// Whether debug mode was requested at launch.
    pub fn launch_flag(&self) -> bool {
        self.launch_flag
    }

    /// Re-evaluate the flag from the launch switch and the stored preference.
    ///
    /// A preference read failure counts as disabled. Storage is not consulted
    /// when the launch switch is on.
    pub fn is_enabled(&self) -> bool {
        let enabled = self.launch_flag || self.persisted();
        self.active.store(enabled, Ordering::SeqCst);
        enabled
    }

    fn persisted(&self) -> bool {
        match self.preferences.get(DEBUG_PREFERENCE_KEY) {
            Ok(value) => value.as_deref() == Some("1"),
            Err(e) => {
                tracing::debug!("Debug preference unreadable: {}", e);
                false
            }
        }
    }

    /// The value from the last evaluation or toggle, without touching storage.
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Set the flag and persist it. Storage failures are logged and ignored.
    pub fn set_enabled(&self, enabled: bool) {
        self.active.store(enabled, Ordering::SeqCst);
        let value = if enabled { "1" } else { "0" };
        if let Err(e) = self.preferences.set(DEBUG_PREFERENCE_KEY, value) {
            tracing::warn!("Failed to persist debug preference: {}", e);
        }
    }

    /// Flip the flag, persist it, and return the new value.
    pub fn toggle(&self) -> bool {
        let next = !self.is_active();
        self.set_enabled(next);
        next
    }
}

impl std::fmt::Debug for DebugState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DebugState")
            .field("launch_flag", &self.launch_flag)
            .field("active", &self.is_active())
            .finish()
    }
}
