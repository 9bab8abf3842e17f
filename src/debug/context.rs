//! Process-wide network debugging context.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use once_cell::sync::OnceCell;

use super::entry::FailureContext;
use super::state::DebugState;
use super::store::NetworkLog;
use crate::traits::PreferenceStore;

static GLOBAL: OnceCell<NetworkDebug> = OnceCell::new();

/// Connectivity and focus as last observed by the application.
#[derive(Debug)]
pub struct Presence {
    online: AtomicBool,
    visible: AtomicBool,
    hostname: Option<String>,
}

impl Presence {
    pub fn new() -> Self {
        let hostname = hostname::get()
            .ok()
            .and_then(|name| name.into_string().ok());
        Self {
            online: AtomicBool::new(true),
            visible: AtomicBool::new(true),
            hostname,
        }
    }

    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::Relaxed);
    }

    pub fn is_online(&self) -> bool {
        self.online.load(Ordering::Relaxed)
    }

    /// Record whether the terminal currently has focus.
    pub fn set_visible(&self, visible: bool) {
        self.visible.store(visible, Ordering::Relaxed);
    }

    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::Relaxed)
    }

    pub fn hostname(&self) -> Option<&str> {
        self.hostname.as_deref()
    }

    /// Context attached to failed entries.
    pub fn snapshot(&self) -> FailureContext {
        FailureContext {
            online: self.is_online(),
            visible: self.is_visible(),
            hostname: self.hostname.clone(),
        }
    }
}

impl Default for Presence {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything the interceptor and the viewers share.
#[derive(Debug, Clone)]
pub struct NetworkDebug {
    pub log: NetworkLog,
    pub state: Arc<DebugState>,
    pub presence: Arc<Presence>,
}

impl NetworkDebug {
    pub fn new(log: NetworkLog, state: DebugState) -> Self {
        Self {
            log,
            state: Arc::new(state),
            presence: Arc::new(Presence::new()),
        }
    }

    /// Build a context from a launch flag, preference store and log capacity.
    pub fn from_parts(
        launch_flag: bool,
        preferences: Arc<dyn PreferenceStore>,
        capacity: usize,
    ) -> Self {
        Self::new(
            NetworkLog::with_capacity(capacity),
            DebugState::new(launch_flag, preferences),
        )
    }
}

/// Register the process-wide context. The first call wins; later calls return
/// the context that is already registered.
pub fn init_global(ctx: NetworkDebug) -> &'static NetworkDebug {
    let mut fresh = false;
    let registered = GLOBAL.get_or_init(|| {
        fresh = true;
        ctx
    });
    if !fresh {
        tracing::debug!("Network debug context already registered");
    }
    registered
}

/// The process-wide context, if one has been registered.
pub fn global() -> Option<&'static NetworkDebug> {
    GLOBAL.get()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::InMemoryPreferences;

    #[test]
    fn test_presence_defaults() {
        let presence = Presence::new();
        assert!(presence.is_online());
        assert!(presence.is_visible());
    }

    #[test]
    fn test_presence_snapshot() {
        let presence = Presence::new();
        presence.set_online(false);
        presence.set_visible(false);

        let ctx = presence.snapshot();
        assert!(!ctx.online);
        assert!(!ctx.visible);
        assert_eq!(ctx.hostname.as_deref(), presence.hostname());
    }

    #[test]
    fn test_from_parts() {
        let ctx = NetworkDebug::from_parts(true, Arc::new(InMemoryPreferences::new()), 10);
        assert!(ctx.state.is_active());
        assert_eq!(ctx.log.capacity(), Some(10));
    }

    #[test]
    fn test_clones_share_state() {
        let ctx = NetworkDebug::from_parts(false, Arc::new(InMemoryPreferences::new()), 0);
        let other = ctx.clone();
        other.state.toggle();
        other.presence.set_online(false);
        assert!(ctx.state.is_active());
        assert!(!ctx.presence.is_online());
    }
}
