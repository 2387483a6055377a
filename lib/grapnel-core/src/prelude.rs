//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and functions
//! for easy glob importing:
//!
//! ```ignore
//! use grapnel_core::prelude::*;
//! ```

pub use crate::{
    Body, BodyInit, Credentials, Error, HttpRequest, Method, Outcome, QueryParam, RequestConfig,
    RequestInit, Result, Transport, TransportRequest, TransportResponse, build_query_string,
    from_json,
};
