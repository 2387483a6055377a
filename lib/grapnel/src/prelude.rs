//! Prelude module for convenient imports.
//!
//! ```ignore
//! use grapnel::prelude::*;
//! ```

pub use grapnel_core::prelude::*;

pub use crate::{
    HyperTransport, TransportConfig, http_delete, http_get, http_post, http_put,
    http_request_with,
};
