//! Application state.
//!
//! The app shows the tool catalog and hosts the network debug panel. Network
//! calls run on background tasks and report back through [`AppMessage`]s.

mod handlers;
mod messages;

pub use handlers::AppAction;
pub use messages::AppMessage;

use std::path::PathBuf;
use std::sync::Arc;

use crate::catalog::Tool;
use crate::debug::{DebugPanel, NetworkDebug, Presence};

/// Main application state.
pub struct App {
    /// Tools from the last successful load
    pub tools: Vec<Tool>,
    /// Category names from the last successful load
    pub categories: Vec<String>,
    /// Index of the highlighted tool
    pub selected: usize,
    /// Status line text
    pub status: Option<String>,
    /// Number of catalog loads in flight
    pub pending_loads: usize,
    /// Set when the user asked to quit
    pub should_quit: bool,
    /// Whether the UI needs to be redrawn
    pub needs_redraw: bool,
    /// The mounted network debug panel
    pub panel: DebugPanel,
    presence: Arc<Presence>,
    export_dir: PathBuf,
}

impl App {
    pub fn new(ctx: &NetworkDebug, export_dir: impl Into<PathBuf>) -> Self {
        Self {
            tools: Vec::new(),
            categories: Vec::new(),
            selected: 0,
            status: None,
            pending_loads: 0,
            should_quit: false,
            needs_redraw: true,
            panel: DebugPanel::mount(ctx),
            presence: Arc::clone(&ctx.presence),
            export_dir: export_dir.into(),
        }
    }

    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    pub fn is_loading(&self) -> bool {
        self.pending_loads > 0
    }

    /// Mark a refresh as started. `loads` is the number of messages to expect.
    pub fn begin_refresh(&mut self, loads: usize) {
        self.pending_loads += loads;
        self.status = Some("Loading catalog...".to_string());
    }

    /// The highlighted tool, if any.
    pub fn selected_tool(&self) -> Option<&Tool> {
        self.tools.get(self.selected)
    }

    /// Apply a message from a background task.
    pub fn handle_message(&mut self, message: AppMessage) {
        self.mark_dirty();
        self.pending_loads = self.pending_loads.saturating_sub(1);
        match message {
            AppMessage::ToolsLoaded(tools) => {
                self.presence.set_online(true);
                self.status = Some(format!("{} tools", tools.len()));
                self.tools = tools;
                if self.selected >= self.tools.len() {
                    self.selected = self.tools.len().saturating_sub(1);
                }
            }
            AppMessage::CategoriesLoaded(categories) => {
                self.presence.set_online(true);
                self.categories = categories;
            }
            AppMessage::RequestFailed {
                what,
                error,
                connectivity,
            } => {
                if connectivity {
                    self.presence.set_online(false);
                }
                tracing::warn!("Failed to load {}: {}", what, error);
                self.status = Some(format!("Could not load {}: {}", what, error));
            }
        }
    }

    /// Record terminal focus changes.
    pub fn set_focused(&mut self, focused: bool) {
        self.presence.set_visible(focused);
    }

    /// Pull pending log events into the panel.
    pub fn tick(&mut self) {
        if self.panel.poll() {
            self.mark_dirty();
        }
    }

    fn export_logs(&mut self) {
        self.status = Some(match self.panel.export_to(&self.export_dir) {
            Ok(path) => format!("Exported network log to {}", path.display()),
            Err(e) => {
                tracing::warn!("Network log export failed: {}", e);
                format!("Export failed: {}", e)
            }
        });
    }
}
