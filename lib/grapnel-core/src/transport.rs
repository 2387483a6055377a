//! The transport seam.
//!
//! A [`Transport`] is the external collaborator that actually moves bytes:
//! it receives a fully-built [`TransportRequest`] (including the
//! cancellation signal) and resolves to a [`TransportResponse`] or an
//! [`crate::Error`]. A transport observing a triggered signal must fail
//! with [`crate::Error::Aborted`].

use std::collections::HashMap;
use std::future::Future;

use bytes::Bytes;
use tokio_util::sync::CancellationToken;

use crate::{Credentials, Method, Result};

/// Wire-ready request parameters handed to a [`Transport`].
#[derive(Debug, Clone)]
pub struct TransportRequest {
    /// HTTP method.
    pub method: Method,
    /// Target URL; validation is the transport's concern.
    pub url: String,
    /// Final merged headers.
    pub headers: HashMap<String, String>,
    /// Serialized body, if any.
    pub body: Option<Bytes>,
    /// Credentials mode.
    pub credentials: Credentials,
    /// Cancellation signal for this dispatch.
    pub signal: CancellationToken,
}

/// Raw response produced by a [`Transport`].
#[derive(Debug, Clone)]
pub struct TransportResponse {
    status: u16,
    headers: HashMap<String, String>,
    body: Bytes,
}

impl TransportResponse {
    /// Creates a new response.
    #[must_use]
    pub fn new(status: u16, headers: HashMap<String, String>, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Status is 2xx.
    #[must_use]
    pub const fn ok(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Response headers.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Single header value by name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Response body.
    #[must_use]
    pub const fn body(&self) -> &Bytes {
        &self.body
    }

    /// Deserialize the response body as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T> {
        crate::from_json(&self.body)
    }

    /// Get the response body as text.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not valid UTF-8.
    pub fn text(&self) -> Result<String> {
        String::from_utf8(self.body.to_vec())
            .map_err(|e| crate::Error::invalid_request(e.to_string()))
    }
}

/// A fetch-like capability that executes one HTTP exchange.
pub trait Transport: Send + Sync {
    /// Send the request and await its settlement.
    ///
    /// # Errors
    ///
    /// Returns an error if the exchange fails:
    /// - Network or TLS errors
    /// - An invalid URL or request
    /// - Cancellation ([`crate::Error::Aborted`])
    fn send(
        &self,
        request: TransportRequest,
    ) -> impl Future<Output = Result<TransportResponse>> + Send;
}
