//! HTTP plumbing shared by the capability adapters
//!
//! - `VendorConfig` - typed view of a provider's configuration blob
//! - `HttpHarness` - client, authentication and response translation

pub mod config;
pub mod harness;

pub use config::VendorConfig;
pub use harness::{HttpHarness, VendorCall, build_client};
