//! Network debugging.
//!
//! The interceptor records one [`LogEntry`] per outgoing call into a shared
//! [`NetworkLog`] and announces it on a broadcast channel. Viewers (the
//! terminal [`DebugPanel`] and the browser dashboard) follow that channel and
//! only call back into the log to clear it.
//!
//! Tagging requests with a `dbg=<id>` query parameter is gated by the
//! [`DebugState`] flag; logging happens regardless.

pub mod context;
pub mod correlation;
pub mod entry;
mod html;
pub mod interceptor;
pub mod panic;
pub mod server;
pub mod state;
pub mod store;
pub mod viewer;

pub use context::{global, init_global, NetworkDebug, Presence};
pub use correlation::{add_query_param, new_correlation_id, DEBUG_QUERY_KEY};
pub use entry::{ErrorInfo, FailureContext, LogEntry, SNIPPET_LIMIT};
pub use interceptor::{InstrumentedClient, SharedClient};
pub use panic::install_panic_logger;
pub use server::{dashboard_router, start_dashboard, start_dashboard_on, DEFAULT_DASHBOARD_PORT};
pub use state::{DebugState, DEBUG_PREFERENCE_KEY};
pub use store::{LogEvent, LogEventSender, NetworkLog};
pub use viewer::{DebugPanel, ExportDocument, ExportError};
