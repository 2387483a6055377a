//! Method-named factory surface.
//!
//! Each factory returns an [`HttpRequest`] bound to a process-wide
//! [`HyperTransport`], pre-configured for one HTTP method:
//!
//! ```ignore
//! use grapnel::{RequestInit, http_get};
//!
//! let mut request = http_get(RequestInit::default());
//! let outcome = request
//!     .with_url("https://api.example.com/users")
//!     .execute()
//!     .await;
//! ```

use std::sync::OnceLock;

use grapnel_core::{HttpRequest, Method, RequestInit, Transport};

use crate::transport::HyperTransport;

/// Shared default transport; clones share the connection pool.
fn default_transport() -> HyperTransport {
    static TRANSPORT: OnceLock<HyperTransport> = OnceLock::new();
    TRANSPORT.get_or_init(HyperTransport::new).clone()
}

/// Create a GET request bound to the default transport.
#[must_use]
pub fn http_get(init: RequestInit) -> HttpRequest<HyperTransport> {
    HttpRequest::new(Method::Get, default_transport(), init)
}

/// Create a POST request bound to the default transport.
#[must_use]
pub fn http_post(init: RequestInit) -> HttpRequest<HyperTransport> {
    HttpRequest::new(Method::Post, default_transport(), init)
}

/// Create a PUT request bound to the default transport.
#[must_use]
pub fn http_put(init: RequestInit) -> HttpRequest<HyperTransport> {
    HttpRequest::new(Method::Put, default_transport(), init)
}

/// Create a DELETE request bound to the default transport.
#[must_use]
pub fn http_delete(init: RequestInit) -> HttpRequest<HyperTransport> {
    HttpRequest::new(Method::Delete, default_transport(), init)
}

/// Create a request for any method, bound to a caller-supplied transport.
///
/// Useful for tests and for composing a customized [`HyperTransport`].
#[must_use]
pub fn http_request_with<T: Transport>(
    method: Method,
    transport: T,
    init: RequestInit,
) -> HttpRequest<T> {
    HttpRequest::new(method, transport, init)
}
