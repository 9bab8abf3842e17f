//! Messages from background tasks to the app.

use crate::catalog::{CatalogError, Tool};

/// Results of async catalog operations.
#[derive(Debug, Clone)]
pub enum AppMessage {
    /// `GET /tools` succeeded
    ToolsLoaded(Vec<Tool>),
    /// `GET /kategorier` succeeded
    CategoriesLoaded(Vec<String>),
    /// A catalog call failed
    RequestFailed {
        /// What was being fetched, for the status line
        what: String,
        /// Display form of the error
        error: String,
        /// Whether the failure looked like lost connectivity
        connectivity: bool,
    },
}

impl AppMessage {
    pub fn failed(what: impl Into<String>, err: &CatalogError) -> Self {
        AppMessage::RequestFailed {
            what: what.into(),
            error: err.to_string(),
            connectivity: err.is_connectivity(),
        }
    }
}
