//! Reqwest-based HTTP client adapter.
//!
//! This module provides the production transport, implementing the
//! [`HttpClient`] trait from `crate::traits`. Relative targets (`/tools`) are
//! resolved against the configured origin.

use async_trait::async_trait;

use crate::traits::{Headers, HttpClient, HttpError, Request, Response};

/// HTTP client implementation using reqwest.
///
/// # Example
///
/// ```ignore
/// use toolcat::adapters::ReqwestHttpClient;
/// use toolcat::traits::{HttpClient, Request};
///
/// let client = ReqwestHttpClient::with_origin("http://localhost:4300");
/// let response = client.send(Request::get("/tools")).await?;
/// println!("Status: {}", response.status);
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
    origin: Option<String>,
}

impl ReqwestHttpClient {
    /// Create a new ReqwestHttpClient with default settings and no origin.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            origin: None,
        }
    }

    /// Create a client that resolves relative targets against `origin`.
    pub fn with_origin(origin: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            origin: Some(origin.into().trim_end_matches('/').to_string()),
        }
    }

    /// Create a new ReqwestHttpClient with a custom reqwest::Client.
    pub fn with_client(client: reqwest::Client, origin: Option<String>) -> Self {
        Self {
            client,
            origin: origin.map(|o| o.trim_end_matches('/').to_string()),
        }
    }

    /// Get a reference to the underlying reqwest::Client.
    pub fn inner(&self) -> &reqwest::Client {
        &self.client
    }

    /// The configured origin, if any.
    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }

    /// Turn a request target into an absolute URL.
    fn resolve(&self, target: &str) -> Result<String, HttpError> {
        if target.starts_with('/') {
            match &self.origin {
                Some(origin) => Ok(format!("{}{}", origin, target)),
                None => Err(HttpError::InvalidUrl(format!(
                    "relative target '{}' without an origin",
                    target
                ))),
            }
        } else {
            Ok(target.to_string())
        }
    }

    /// Convert reqwest error to HttpError.
    fn convert_error(err: reqwest::Error) -> HttpError {
        if err.is_timeout() {
            HttpError::Timeout(err.to_string())
        } else if err.is_connect() {
            HttpError::ConnectionFailed(err.to_string())
        } else if err.is_builder() {
            HttpError::InvalidUrl(err.to_string())
        } else if err.is_body() || err.is_decode() {
            HttpError::Io(err.to_string())
        } else {
            HttpError::Other(err.to_string())
        }
    }

    /// Convert reqwest headers to our Headers type.
    fn convert_headers(headers: &reqwest::header::HeaderMap) -> Headers {
        headers
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.to_string(), v.to_string()))
            })
            .collect()
    }

    /// Apply headers to a request builder.
    fn apply_headers(
        builder: reqwest::RequestBuilder,
        headers: &Headers,
    ) -> reqwest::RequestBuilder {
        let mut builder = builder;
        for (key, value) in headers {
            builder = builder.header(key, value);
        }
        builder
    }
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn send(&self, request: Request) -> Result<Response, HttpError> {
        let url = self.resolve(&request.url)?;
        let method = reqwest::Method::from_bytes(request.normalized_method().as_bytes())
            .map_err(|e| HttpError::Other(e.to_string()))?;

        let mut builder = self.client.request(method, url);
        builder = Self::apply_headers(builder, &request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(Self::convert_error)?;

        let status = response.status().as_u16();
        let response_headers = Self::convert_headers(response.headers());
        let body = response.bytes().await.map_err(Self::convert_error)?;

        Ok(Response::with_headers(status, response_headers, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reqwest_http_client_default() {
        let client = ReqwestHttpClient::default();
        let _ = client.inner();
        assert!(client.origin().is_none());
    }

    #[test]
    fn test_with_origin_trims_trailing_slash() {
        let client = ReqwestHttpClient::with_origin("http://localhost:4300/");
        assert_eq!(client.origin(), Some("http://localhost:4300"));
    }

    #[test]
    fn test_resolve_relative_and_absolute() {
        let client = ReqwestHttpClient::with_origin("http://localhost:4300");
        assert_eq!(
            client.resolve("/tools?dbg=1").unwrap(),
            "http://localhost:4300/tools?dbg=1"
        );
        assert_eq!(
            client.resolve("https://cdn.example.com/a.png").unwrap(),
            "https://cdn.example.com/a.png"
        );
    }

    #[test]
    fn test_resolve_relative_without_origin_fails() {
        let client = ReqwestHttpClient::new();
        assert!(matches!(
            client.resolve("/tools"),
            Err(HttpError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_convert_headers() {
        let mut header_map = reqwest::header::HeaderMap::new();
        header_map.insert(
            reqwest::header::CONTENT_TYPE,
            "application/json".parse().unwrap(),
        );
        header_map.insert(reqwest::header::CONTENT_LENGTH, "100".parse().unwrap());

        let headers = ReqwestHttpClient::convert_headers(&header_map);
        assert_eq!(
            headers.get("content-type"),
            Some(&"application/json".to_string())
        );
        assert_eq!(headers.get("content-length"), Some(&"100".to_string()));
    }

    #[tokio::test]
    async fn test_send_connection_refused() {
        let client = ReqwestHttpClient::with_origin("http://127.0.0.1:59999");
        let result = client.send(Request::get("/tools")).await;
        assert!(result.is_err());
        if let Err(e) = result {
            assert!(matches!(
                e,
                HttpError::ConnectionFailed(_) | HttpError::Other(_)
            ));
        }
    }
}
