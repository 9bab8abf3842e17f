//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - the shared HTTP request primitive
//! - [`PreferenceStore`] - durable per-user key/value settings

pub mod http;
pub mod preferences;

pub use http::{Headers, HttpClient, HttpError, Request, Response};
pub use preferences::{PreferenceError, PreferenceStore};
