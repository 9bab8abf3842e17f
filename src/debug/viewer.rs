//! Debug log viewer state.
//!
//! A [`DebugPanel`] follows the shared log, keeps its own list of entries and
//! exposes the filtered, most-recent-first view that renderers draw. It never
//! issues network calls itself.

use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use thiserror::Error;
use tokio::sync::broadcast::{self, error::TryRecvError};

use super::context::NetworkDebug;
use super::entry::LogEntry;
use super::store::{entries_to_json, LogEvent};

/// Errors from exporting the log to disk.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to serialize logs: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A downloadable snapshot of the log.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportDocument {
    pub filename: String,
    pub contents: String,
}

/// File name for an export taken now.
pub fn export_filename() -> String {
    format!(
        "network-logs-{}.json",
        Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
    )
}

/// `filename` with the `:` of the timestamp replaced, since some file
/// systems reject it.
pub fn disk_filename(filename: &str) -> String {
    filename.replace(':', "-")
}

/// Build an export document from a list of entries.
pub fn build_export(entries: &[LogEntry]) -> Result<ExportDocument, serde_json::Error> {
    Ok(ExportDocument {
        filename: export_filename(),
        contents: entries_to_json(entries)?,
    })
}

/// A mounted debug panel.
///
/// Dropping the panel drops its subscription.
pub struct DebugPanel {
    ctx: NetworkDebug,
    entries: Vec<LogEntry>,
    errors_only: bool,
    open: bool,
    events: broadcast::Receiver<LogEvent>,
}

impl DebugPanel {
    /// Mount a panel over the shared log, starting from its current contents.
    pub fn mount(ctx: &NetworkDebug) -> Self {
        let (entries, events) = ctx.log.subscribe_with_snapshot();
        Self {
            ctx: ctx.clone(),
            entries,
            errors_only: false,
            open: ctx.state.is_active(),
            events,
        }
    }

    /// Replace the local list and subscription with a fresh copy of the store.
    fn resync(&mut self) {
        let (entries, events) = self.ctx.log.subscribe_with_snapshot();
        self.entries = entries;
        self.events = events;
    }

    /// Apply pending log events. Returns true if the entry list changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        loop {
            match self.events.try_recv() {
                Ok(LogEvent::Recorded { entry }) => {
                    self.entries.push(entry);
                    self.trim_to_capacity();
                    changed = true;
                }
                Ok(LogEvent::Cleared) => {
                    self.entries.clear();
                    changed = true;
                }
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::debug!("Debug panel lagged by {} events, resyncing", skipped);
                    self.resync();
                    changed = true;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
        changed
    }

    fn trim_to_capacity(&mut self) {
        if let Some(capacity) = self.ctx.log.capacity() {
            if self.entries.len() > capacity {
                let excess = self.entries.len() - capacity;
                self.entries.drain(..excess);
            }
        }
    }

    /// All entries this panel holds, oldest first.
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Entries to display: most recent first, failures only when filtered.
    pub fn visible(&self) -> Vec<&LogEntry> {
        self.entries
            .iter()
            .rev()
            .filter(|entry| !self.errors_only || entry.is_failure())
            .collect()
    }

    pub fn errors_only(&self) -> bool {
        self.errors_only
    }

    pub fn set_errors_only(&mut self, errors_only: bool) {
        self.errors_only = errors_only;
    }

    pub fn toggle_errors_only(&mut self) {
        self.errors_only = !self.errors_only;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Show or hide the panel without changing the persisted flag.
    pub fn toggle_open(&mut self) {
        self.open = !self.open;
    }

    /// Whether debug mode is currently on.
    pub fn debug_enabled(&self) -> bool {
        self.ctx.state.is_active()
    }

    /// Empty the shared log and this panel.
    ///
    /// Events queued before this clear are dropped; calls that finish after
    /// it are picked up by the next [`poll`](Self::poll).
    pub fn clear(&mut self) {
        self.ctx.log.clear();
        self.entries.clear();
        loop {
            match self.events.try_recv() {
                Ok(LogEvent::Cleared) => break,
                Ok(LogEvent::Recorded { .. }) => {}
                Err(TryRecvError::Lagged(_)) => {
                    self.resync();
                    break;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
    }

    /// The full unfiltered list as an export document.
    pub fn export_document(&self) -> Result<ExportDocument, ExportError> {
        Ok(build_export(&self.entries)?)
    }

    /// Write the export document into `dir` and return the file path.
    pub fn export_to(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        let document = self.export_document()?;
        let path = dir.join(disk_filename(&document.filename));
        std::fs::write(&path, document.contents).map_err(|source| ExportError::Write {
            path: path.clone(),
            source,
        })?;
        tracing::info!("Exported {} network log entries to {}", self.entries.len(), path.display());
        Ok(path)
    }

    /// Flip the persisted debug flag and open or close the panel to match.
    pub fn toggle_persistence(&mut self) -> bool {
        let enabled = self.ctx.state.toggle();
        self.open = enabled;
        enabled
    }
}
