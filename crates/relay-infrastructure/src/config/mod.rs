//! Configuration management
//!
//! Layered loading with figment: built-in defaults, then a TOML file, then
//! `RELAY__`-prefixed environment variables.

pub mod loader;
pub mod types;

pub use loader::{ConfigBuilder, ConfigLoader};
pub use types::*;
