//! Network log entry types.
//!
//! One [`LogEntry`] is recorded per attempted call. An entry is either
//! completed (a response arrived, whatever its status) or failed (the call
//! returned an error); the two constructors are the only way to build one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::traits::{Headers, HttpError, Response};

/// Maximum number of characters kept from a response body.
pub const SNIPPET_LIMIT: usize = 500;

/// Details of a failed call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Error kind name (e.g. "ConnectionFailed", "AbortError")
    pub name: String,
    /// Raw error message
    pub message: String,
    /// Captured backtrace, when backtraces are enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

impl ErrorInfo {
    /// Build from a transport error, capturing a backtrace if enabled.
    pub fn from_http_error(err: &HttpError) -> Self {
        let backtrace = std::backtrace::Backtrace::capture();
        let stack = match backtrace.status() {
            std::backtrace::BacktraceStatus::Captured => Some(backtrace.to_string()),
            _ => None,
        };
        Self {
            name: err.kind().to_string(),
            message: err.message().to_string(),
            stack,
        }
    }
}

/// Environment state recorded alongside a failed call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureContext {
    /// Whether the application last believed it was online
    pub online: bool,
    /// Whether the terminal had focus
    pub visible: bool,
    /// Local host name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
}

/// One record per attempted network call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    /// Correlation id, also sent as the `dbg` query parameter
    pub id: String,
    /// Uppercase HTTP verb
    pub method: String,
    /// Effective request target
    pub url: String,
    /// When the call was dispatched
    pub started_at: DateTime<Utc>,
    /// When the call settled
    pub finished_at: DateTime<Utc>,
    /// Monotonic duration in whole milliseconds
    pub duration_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ok: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_headers: Option<Headers>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_snippet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<FailureContext>,
}

/// Fields shared by completed and failed entries.
#[derive(Debug, Clone)]
pub struct CallTiming {
    pub id: String,
    pub method: String,
    pub url: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub duration_ms: u64,
}

impl LogEntry {
    /// An entry for a call that produced a response.
    pub fn completed(timing: CallTiming, response: &Response, snippet: Option<String>) -> Self {
        Self {
            id: timing.id,
            method: timing.method,
            url: timing.url,
            started_at: timing.started_at,
            finished_at: timing.finished_at,
            duration_ms: timing.duration_ms,
            status: Some(response.status),
            ok: Some(response.is_success()),
            response_headers: Some(response.headers.clone()),
            response_snippet: snippet,
            error: None,
            context: None,
        }
    }

    /// An entry for a call that returned an error.
    pub fn failed(timing: CallTiming, error: ErrorInfo, context: Option<FailureContext>) -> Self {
        Self {
            id: timing.id,
            method: timing.method,
            url: timing.url,
            started_at: timing.started_at,
            finished_at: timing.finished_at,
            duration_ms: timing.duration_ms,
            status: None,
            ok: None,
            response_headers: None,
            response_snippet: None,
            error: Some(error),
            context,
        }
    }

    /// True for non-2xx responses and for failed calls.
    pub fn is_failure(&self) -> bool {
        self.ok != Some(true) || self.error.is_some()
    }

    /// A finished entry carries a status or an error, never both.
    pub fn has_exactly_one_outcome(&self) -> bool {
        self.status.is_some() != self.error.is_some()
    }
}

/// Whether a response body should be captured for the log.
///
/// Error responses are always captured; successful ones only when they look
/// textual, so binary payloads are never decoded.
pub fn should_capture_body(response: &Response) -> bool {
    if !response.is_success() {
        return true;
    }
    let content_type = response.content_type().to_ascii_lowercase();
    ["text", "html", "json"]
        .iter()
        .any(|marker| content_type.contains(marker))
}

/// First [`SNIPPET_LIMIT`] characters of the body, or `None` when the body
/// is not captured. Invalid UTF-8 is replaced with U+FFFD.
pub fn response_snippet(response: &Response) -> Option<String> {
    if !should_capture_body(response) {
        return None;
    }
    let peek = response.clone();
    Some(
        String::from_utf8_lossy(&peek.body)
            .chars()
            .take(SNIPPET_LIMIT)
            .collect(),
    )
}
