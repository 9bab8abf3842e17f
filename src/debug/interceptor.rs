//! Network interceptor.
//!
//! [`InstrumentedClient`] wraps any [`HttpClient`] and records one
//! [`LogEntry`] per call into the shared [`NetworkLog`]. Callers always get
//! back exactly what the inner client produced: the same response with an
//! unconsumed body, or the same error.
//!
//! [`SharedClient`] is the application-wide request slot. Application code
//! sends through it; installing the interceptor swaps the slot's client for
//! an instrumented wrapper, at most once per slot.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Instant;

use async_trait::async_trait;
use chrono::Utc;

use super::context::NetworkDebug;
use super::correlation::{add_query_param, is_relative_target, new_correlation_id, DEBUG_QUERY_KEY};
use super::entry::{response_snippet, CallTiming, ErrorInfo, LogEntry};
use super::panic::install_panic_logger;
use crate::traits::{HttpClient, HttpError, Request, Response};

/// An [`HttpClient`] that logs every call it forwards.
pub struct InstrumentedClient<C> {
    inner: C,
    ctx: NetworkDebug,
}

impl<C: HttpClient> InstrumentedClient<C> {
    pub fn new(inner: C, ctx: NetworkDebug) -> Self {
        Self { inner, ctx }
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    pub fn context(&self) -> &NetworkDebug {
        &self.ctx
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    (started.elapsed().as_secs_f64() * 1000.0).round() as u64
}

#[async_trait]
impl<C: HttpClient> HttpClient for InstrumentedClient<C> {
    async fn send(&self, mut request: Request) -> Result<Response, HttpError> {
        let id = new_correlation_id();
        let debug = self.ctx.state.is_enabled();
        let method = request.normalized_method();

        if debug && is_relative_target(&request.url) {
            request.url = add_query_param(&request.url, DEBUG_QUERY_KEY, &id);
        }
        let url = request.url.clone();

        let started_at = Utc::now();
        let started = Instant::now();

        let result = self.inner.send(request).await;

        let timing = CallTiming {
            id,
            method,
            url,
            started_at,
            finished_at: Utc::now(),
            duration_ms: elapsed_ms(started),
        };

        match result {
            Ok(response) => {
                let snippet = response_snippet(&response);
                let entry = LogEntry::completed(timing, &response, snippet);

                tracing::debug!(
                    target: "toolcat::net",
                    "[Network] {} {} -> {} in {}ms (id={})",
                    entry.method,
                    entry.url,
                    response.status,
                    entry.duration_ms,
                    entry.id
                );
                if !response.is_success() {
                    tracing::error!(
                        target: "toolcat::net",
                        "[Network Error] {} {} returned {}: {}",
                        entry.method,
                        entry.url,
                        response.status,
                        entry.response_snippet.as_deref().unwrap_or("")
                    );
                }

                self.ctx.log.record(entry);
                Ok(response)
            }
            Err(err) => {
                let info = ErrorInfo::from_http_error(&err);
                let context = self.ctx.presence.snapshot();
                let entry = LogEntry::failed(timing, info, Some(context));

                tracing::error!(
                    target: "toolcat::net",
                    "[Network Failure] {} {} failed after {}ms (id={}): {}",
                    entry.method,
                    entry.url,
                    entry.duration_ms,
                    entry.id,
                    err
                );

                self.ctx.log.record(entry);
                Err(err)
            }
        }
    }
}

/// The application-wide request slot.
///
/// Holds the current client behind a lock that is only taken to clone the
/// handle out, never across an await.
pub struct SharedClient {
    inner: RwLock<Arc<dyn HttpClient>>,
    instrumented: AtomicBool,
}

impl SharedClient {
    pub fn new(client: Arc<dyn HttpClient>) -> Self {
        Self {
            inner: RwLock::new(client),
            instrumented: AtomicBool::new(false),
        }
    }

    /// The client requests are currently sent through.
    pub fn current(&self) -> Arc<dyn HttpClient> {
        match self.inner.read() {
            Ok(guard) => Arc::clone(&*guard),
            Err(poisoned) => Arc::clone(&*poisoned.into_inner()),
        }
    }

    /// Wrap the current client with the interceptor.
    ///
    /// Returns `false` without changing anything when this slot is already
    /// instrumented. The first install also installs the panic logger.
    pub fn install(&self, ctx: &NetworkDebug) -> bool {
        if self
            .instrumented
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            tracing::debug!(target: "toolcat::net", "Network interceptor already installed");
            return false;
        }

        let mut guard = match self.inner.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let original = Arc::clone(&*guard);
        *guard = Arc::new(InstrumentedClient::new(original, ctx.clone()));
        drop(guard);

        install_panic_logger();
        tracing::info!(target: "toolcat::net", "Network interceptor installed");
        true
    }

    pub fn is_instrumented(&self) -> bool {
        self.instrumented.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HttpClient for SharedClient {
    async fn send(&self, request: Request) -> Result<Response, HttpError> {
        let client = self.current();
        client.send(request).await
    }
}
