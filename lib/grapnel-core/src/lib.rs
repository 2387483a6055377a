//! Core types for the grapnel HTTP request layer.
//!
//! This crate provides the transport-agnostic pieces:
//! - [`HttpRequest`] and [`RequestInit`] - the fluent request instance
//! - [`Outcome`] - the normalized result of an execution
//! - [`Transport`], [`TransportRequest`], [`TransportResponse`] - the
//!   seam to the actual HTTP machinery
//! - [`Method`] - HTTP method enum
//! - [`RequestConfig`] and [`Credentials`] - construction-time configuration
//! - [`Error`] and [`Result`] - Error handling
//! - [`build_query_string`] - pure query-string helper
//!
//! The batteries-included `grapnel` crate adds a hyper-based transport and
//! the method-named factory functions.

mod body;
mod config;
mod error;
mod method;
mod outcome;
pub mod prelude;
mod query;
mod request;
mod transport;

pub use body::{Body, BodyInit, from_json};
pub use config::{Credentials, RequestConfig, RequestConfigBuilder};
pub use error::{Error, Result};
pub use method::Method;
pub use outcome::{ErrorBody, Outcome};
pub use query::{QueryParam, build_query_string};
pub use request::{HttpRequest, RequestInit};
pub use transport::{Transport, TransportRequest, TransportResponse};

// Re-export the cancellation token so transports need no direct tokio-util
// dependency
pub use tokio_util::sync::CancellationToken;
