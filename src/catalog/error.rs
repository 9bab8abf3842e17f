//! Catalog API errors.

use thiserror::Error;

use crate::traits::HttpError;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Server returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("'{0}' already exists")]
    Conflict(String),

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Missing required fields: {}", .0.join(", "))]
    InvalidInput(Vec<String>),

    #[error("Icon is {0} bytes, the limit is 5 MB")]
    IconTooLarge(usize),

    #[error("Category '{category}' is used by {count} tool(s)")]
    InUse { category: String, count: usize },
}

impl CatalogError {
    /// Whether the failure was a transport error rather than a server reply.
    pub fn is_connectivity(&self) -> bool {
        matches!(
            self,
            CatalogError::Http(HttpError::ConnectionFailed(_)) | CatalogError::Http(HttpError::Timeout(_))
        )
    }
}
