//! The request instance: fluent builder plus executor.
//!
//! An [`HttpRequest`] owns all request state — URL, headers, body,
//! configuration, and the cancellation token — and is executed against the
//! [`Transport`] it was built with.
//!
//! Fluent mutators take `&mut self`, so the borrow checker rules out
//! mutation while an `execute` is suspended. [`HttpRequest::execute`] and
//! [`HttpRequest::abort`] both take `&self`, so an in-flight call can be
//! cancelled from the same scope:
//!
//! ```ignore
//! let (outcome, ()) = tokio::join!(request.execute(), async {
//!     tokio::time::sleep(deadline).await;
//!     request.abort();
//! });
//! ```

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio_util::sync::CancellationToken;

use crate::{
    Body, BodyInit, Method, Outcome, RequestConfig, Transport, TransportRequest, outcome,
};

/// Default headers, merged under caller-supplied headers.
fn default_headers() -> HashMap<String, String> {
    HashMap::from([
        ("Accept".to_string(), "application/json".to_string()),
        ("Content-Type".to_string(), "application/json".to_string()),
    ])
}

/// Initialization properties for a request instance.
///
/// All fields are defaultable, so factories accept
/// `RequestInit::default()` as well as a fully specified value.
#[derive(Debug, Clone, Default)]
pub struct RequestInit {
    /// Initial URL; empty by default.
    pub url: String,
    /// Initial headers, merged over the defaults.
    pub headers: HashMap<String, String>,
    /// Initial body.
    pub body: BodyInit,
    /// Request configuration.
    pub config: RequestConfig,
}

/// A mutable request instance bound to a transport.
#[derive(Debug)]
pub struct HttpRequest<T> {
    transport: T,
    method: Method,
    url: String,
    headers: HashMap<String, String>,
    body: Body,
    config: RequestConfig,
    // Owned, swappable: a triggered token is never reused.
    cancel: Mutex<CancellationToken>,
    processing: AtomicBool,
}

impl<T> HttpRequest<T> {
    /// Creates a request instance for the given method and transport.
    #[must_use]
    pub fn new(method: Method, transport: T, init: RequestInit) -> Self {
        let mut headers = if init.config.use_default_headers {
            default_headers()
        } else {
            HashMap::new()
        };
        headers.extend(init.headers);
        let body = Body::from_init(init.body, init.config.stringify_body);

        Self {
            transport,
            method,
            url: init.url,
            headers,
            body,
            config: init.config,
            cancel: Mutex::new(CancellationToken::new()),
            processing: AtomicBool::new(false),
        }
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Current URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Current headers.
    #[must_use]
    pub const fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Single header value by name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Current body.
    #[must_use]
    pub const fn body(&self) -> &Body {
        &self.body
    }

    /// Request configuration.
    #[must_use]
    pub const fn config(&self) -> &RequestConfig {
        &self.config
    }

    /// A dispatch is currently awaiting transport settlement.
    #[must_use]
    pub fn is_processing(&self) -> bool {
        self.processing.load(Ordering::Acquire)
    }

    /// Replaces the URL. No validation; invalid URLs surface as transport
    /// failures on execution.
    pub fn with_url(&mut self, value: impl Into<String>) -> &mut Self {
        self.url = value.into();
        self
    }

    /// Replaces the header set, re-merging defaults under the supplied
    /// value when default headers are enabled. Caller values win on
    /// collision.
    pub fn with_headers(&mut self, value: impl IntoIterator<Item = (String, String)>) -> &mut Self {
        let mut headers = if self.config.use_default_headers {
            default_headers()
        } else {
            HashMap::new()
        };
        headers.extend(value);
        self.headers = headers;
        self
    }

    /// Sets the body, applying the stringify policy at call time.
    pub fn with_body(&mut self, value: impl Into<BodyInit>) -> &mut Self {
        self.body = Body::from_init(value.into(), self.config.stringify_body);
        self
    }

    /// Merges headers into the current set: matching keys are overwritten,
    /// new keys are added.
    pub fn add_headers(&mut self, value: impl IntoIterator<Item = (String, String)>) {
        self.headers.extend(value);
    }

    /// Overwrites values for keys already present; absent keys are
    /// silently ignored.
    pub fn patch_headers(&mut self, value: impl IntoIterator<Item = (String, String)>) {
        for (key, val) in value {
            if let Some(existing) = self.headers.get_mut(&key) {
                *existing = val;
            }
        }
    }

    /// Deletes a header. Returns whether it was present.
    pub fn remove_header(&mut self, key: &str) -> bool {
        self.headers.remove(key).is_some()
    }

    /// Cancels the in-flight transport call, if any, and re-arms the
    /// instance with a fresh token so it stays usable. Idempotent: with
    /// nothing in flight this is a no-op beyond the re-arm.
    pub fn abort(&self) {
        let mut cancel = self
            .cancel
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        cancel.cancel();
        *cancel = CancellationToken::new();
    }

    /// Clone of the currently armed token.
    fn signal(&self) -> CancellationToken {
        self.cancel
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

impl<T: Transport> HttpRequest<T> {
    /// Dispatches the request through the transport and normalizes the
    /// settlement into an [`Outcome`]. Never panics and never returns an
    /// error: every failure mode is folded into the outcome.
    ///
    /// With `allow_multiple` off, a call issued while a previous one has
    /// not settled is refused locally with [`Outcome::Busy`]; no transport
    /// call is made. The check is advisory, not a lock.
    pub async fn execute(&self) -> Outcome {
        if self.processing.swap(true, Ordering::AcqRel) && !self.config.allow_multiple {
            if self.config.diagnostics {
                tracing::warn!(
                    "an HttpRequest instance can only run one request at a time; \
                     enable `allow_multiple` in the configuration to lift this"
                );
            }
            return Outcome::Busy;
        }
        // Cleared on every exit path, including cancellation of this future
        let _guard = ProcessingGuard {
            flag: &self.processing,
        };

        let request = TransportRequest {
            method: self.method,
            url: self.url.clone(),
            headers: self.headers.clone(),
            body: self.body.to_bytes(),
            credentials: self.config.credentials,
            signal: self.signal(),
        };
        let result = self.transport.send(request).await;
        outcome::normalize(result, self.config.diagnostics)
    }
}

struct ProcessingGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for ProcessingGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
