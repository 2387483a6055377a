//! Small HTTP request layer with normalized outcomes and cancellation.
//!
//! Obtain a request through a method-named factory, shape it with fluent
//! mutators, execute it, and match on the normalized [`Outcome`] — no
//! execution path throws:
//!
//! ```ignore
//! use grapnel::{Outcome, RequestInit, http_get};
//!
//! let mut request = http_get(RequestInit::default());
//! let outcome = request
//!     .with_url("https://api.example.com/users?active=true")
//!     .execute()
//!     .await;
//!
//! match outcome {
//!     Outcome::Success { value, .. } => println!("users: {value:?}"),
//!     Outcome::Rejected { status, .. } => eprintln!("rejected: {status}"),
//!     Outcome::Failed { aborted, .. } if aborted => eprintln!("cancelled"),
//!     other => eprintln!("failed: {other:?}"),
//! }
//! ```
//!
//! `abort()` cancels an in-flight call and immediately re-arms the
//! instance, so the same request can be issued again.

mod factory;
pub mod prelude;
mod transport;

// Re-export the factory surface and transport
pub use factory::{http_delete, http_get, http_post, http_put, http_request_with};
pub use transport::{HyperTransport, TransportConfig, TransportConfigBuilder};

// Re-export core types
pub use grapnel_core::{
    Body, BodyInit, CancellationToken, Credentials, Error, ErrorBody, HttpRequest, Method,
    Outcome, QueryParam, RequestConfig, RequestConfigBuilder, RequestInit, Result, Transport,
    TransportRequest, TransportResponse, build_query_string, from_json,
};
