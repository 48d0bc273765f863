//! Provider Utilities
//!
//! Shared utilities used by adapter implementations.

mod http_response;
mod json;

pub use http_response::{HttpResponseUtils, map_send_error};
pub use json::JsonExt;
