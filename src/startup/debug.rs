//! Network debug initialization.
//!
//! Builds the process-wide [`NetworkDebug`] context, installs the interceptor
//! on the shared client and starts the dashboard server.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::task::JoinHandle;

use super::config::StartupConfig;
use crate::adapters::{FilePreferences, InMemoryPreferences};
use crate::debug::{init_global, start_dashboard, NetworkDebug, SharedClient};
use crate::traits::PreferenceStore;

/// Result of debug system initialization.
pub struct DebugSystemResult {
    /// The registered context
    pub ctx: &'static NetworkDebug,
    /// Dashboard server handle (for cleanup on shutdown)
    pub server_handle: Option<JoinHandle<()>>,
    /// Address the dashboard is bound to
    pub server_addr: Option<SocketAddr>,
}

/// Preference storage in the user's home directory, or in memory when there
/// is none.
pub fn default_preferences() -> Arc<dyn PreferenceStore> {
    match FilePreferences::new() {
        Some(prefs) => Arc::new(prefs),
        None => {
            tracing::warn!("No home directory, debug preference will not persist");
            Arc::new(InMemoryPreferences::new())
        }
    }
}

/// Register the network debug context and instrument `client`.
///
/// Safe to call more than once; later calls reuse the registered context and
/// leave the client alone.
pub fn install_network_debug(
    config: &StartupConfig,
    preferences: Arc<dyn PreferenceStore>,
    client: &SharedClient,
) -> &'static NetworkDebug {
    let ctx = init_global(NetworkDebug::from_parts(
        config.debug,
        preferences,
        config.log_capacity,
    ));
    client.install(ctx);
    ctx
}

/// Install network debugging and start the dashboard if enabled.
///
/// If the dashboard fails to start the app continues without it.
pub async fn start_debug_system(
    config: &StartupConfig,
    preferences: Arc<dyn PreferenceStore>,
    client: &SharedClient,
) -> DebugSystemResult {
    let ctx = install_network_debug(config, preferences, client);

    if !config.enable_dashboard {
        return DebugSystemResult {
            ctx,
            server_handle: None,
            server_addr: None,
        };
    }

    match start_dashboard(config.dashboard_port, ctx.clone()).await {
        Ok((handle, addr)) => DebugSystemResult {
            ctx,
            server_handle: Some(handle),
            server_addr: Some(addr),
        },
        Err(e) => {
            // e.g. port already in use
            tracing::warn!("Debug dashboard not started: {}", e);
            DebugSystemResult {
                ctx,
                server_handle: None,
                server_addr: None,
            }
        }
    }
}
