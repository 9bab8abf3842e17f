//! Client for the internal tools catalog API.
//!
//! Tools and categories live behind a small REST API (`/tools`,
//! `/kategorier`). The client issues every call through an [`HttpClient`],
//! normally the application's shared, instrumented client.
//!
//! [`HttpClient`]: crate::traits::HttpClient

mod client;
mod error;
mod models;

pub use client::CatalogClient;
pub use error::CatalogError;
pub use models::{normalize_categories, NewTool, Tool, MAX_ICON_BYTES};
