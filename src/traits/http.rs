//! HTTP client trait abstraction.
//!
//! Provides the request primitive shared by the whole application. Every
//! outgoing call goes through an [`HttpClient`], which lets the network
//! interceptor wrap the production client and lets tests swap in mocks.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;

/// HTTP headers represented as a key-value map.
pub type Headers = HashMap<String, String>;

/// An outgoing HTTP request.
///
/// `url` is either absolute (`https://host/path`) or relative to the
/// application origin (`/tools`). Relative targets are resolved by the
/// transport adapter.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    /// HTTP verb. Empty means GET.
    pub method: String,
    /// Request target
    pub url: String,
    /// Request headers
    pub headers: Headers,
    /// Request body
    pub body: Option<Bytes>,
}

impl Request {
    /// Create a request with an explicit method.
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            headers: Headers::new(),
            body: None,
        }
    }

    /// Create a GET request.
    pub fn get(url: impl Into<String>) -> Self {
        Self::new("GET", url)
    }

    /// Create a POST request.
    pub fn post(url: impl Into<String>) -> Self {
        Self::new("POST", url)
    }

    /// Create a DELETE request.
    pub fn delete(url: impl Into<String>) -> Self {
        Self::new("DELETE", url)
    }

    /// Add a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Replace all headers.
    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = headers;
        self
    }

    /// Set a raw body.
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set a JSON body and the matching content type.
    pub fn with_json<T: serde::Serialize>(self, value: &T) -> Result<Self, serde_json::Error> {
        let body = serde_json::to_vec(value)?;
        Ok(self
            .with_header("Content-Type", "application/json")
            .with_body(body))
    }

    /// The uppercase method, defaulting to GET.
    pub fn normalized_method(&self) -> String {
        if self.method.trim().is_empty() {
            "GET".to_string()
        } else {
            self.method.to_uppercase()
        }
    }
}

/// HTTP response wrapper.
///
/// The body is a shared buffer: cloning a response hands out another view of
/// the same bytes, so reading a clone never consumes the original.
#[derive(Debug, Clone)]
pub struct Response {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: Headers,
    /// Response body
    pub body: Bytes,
}

impl Response {
    /// Create a new response.
    pub fn new(status: u16, body: Bytes) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body,
        }
    }

    /// Create a new response with headers.
    pub fn with_headers(status: u16, headers: Headers, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Check if the response indicates success (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Look up a header by name, ignoring ASCII case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// The declared content type, or an empty string.
    pub fn content_type(&self) -> &str {
        self.header("content-type").unwrap_or("")
    }

    /// Get the response body as a string.
    pub fn text(&self) -> Result<String, std::string::FromUtf8Error> {
        String::from_utf8(self.body.to_vec())
    }

    /// Parse the response body as JSON.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// HTTP client errors.
#[derive(Debug, Clone, PartialEq)]
pub enum HttpError {
    /// Connection failed (refused, DNS, network down)
    ConnectionFailed(String),
    /// Request timeout
    Timeout(String),
    /// Request was aborted before completion
    Aborted(String),
    /// IO error while reading the body
    Io(String),
    /// Invalid URL
    InvalidUrl(String),
    /// Other error
    Other(String),
}

impl HttpError {
    /// Name of the error kind, as shown in the debug log.
    pub fn kind(&self) -> &'static str {
        match self {
            HttpError::ConnectionFailed(_) => "ConnectionFailed",
            HttpError::Timeout(_) => "Timeout",
            HttpError::Aborted(_) => "AbortError",
            HttpError::Io(_) => "Io",
            HttpError::InvalidUrl(_) => "InvalidUrl",
            HttpError::Other(_) => "Other",
        }
    }

    /// The raw error detail without the kind prefix.
    pub fn message(&self) -> &str {
        match self {
            HttpError::ConnectionFailed(msg)
            | HttpError::Timeout(msg)
            | HttpError::Aborted(msg)
            | HttpError::Io(msg)
            | HttpError::InvalidUrl(msg)
            | HttpError::Other(msg) => msg,
        }
    }
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HttpError::ConnectionFailed(msg) => write!(f, "Connection failed: {}", msg),
            HttpError::Timeout(msg) => write!(f, "Request timeout: {}", msg),
            HttpError::Aborted(msg) => write!(f, "Request aborted: {}", msg),
            HttpError::Io(msg) => write!(f, "IO error: {}", msg),
            HttpError::InvalidUrl(msg) => write!(f, "Invalid URL: {}", msg),
            HttpError::Other(msg) => write!(f, "HTTP error: {}", msg),
        }
    }
}

impl std::error::Error for HttpError {}

/// Trait for the application's HTTP request primitive.
///
/// Implementations include the production reqwest-based client, the
/// instrumenting wrapper from [`crate::debug`], and mock clients for tests.
///
/// # Example
///
/// ```ignore
/// use toolcat::traits::{HttpClient, HttpError, Request};
///
/// async fn fetch_tools<C: HttpClient>(client: &C) -> Result<String, HttpError> {
///     let response = client.send(Request::get("/tools")).await?;
///     response.text().map_err(|e| HttpError::Other(e.to_string()))
/// }
/// ```
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Dispatch a request and wait for the response headers and body.
    ///
    /// A non-2xx status is a successful call; only transport failures are
    /// errors.
    async fn send(&self, request: Request) -> Result<Response, HttpError>;

    /// Perform a GET request.
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.send(Request::get(url).with_headers(headers.clone()))
            .await
    }

    /// Perform a POST request with a string body.
    async fn post(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.send(
            Request::post(url)
                .with_headers(headers.clone())
                .with_body(body.to_string()),
        )
        .await
    }

    /// Perform a DELETE request.
    async fn delete(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.send(Request::delete(url).with_headers(headers.clone()))
            .await
    }
}

#[async_trait]
impl<T: HttpClient + ?Sized> HttpClient for std::sync::Arc<T> {
    async fn send(&self, request: Request) -> Result<Response, HttpError> {
        (**self).send(request).await
    }
}
