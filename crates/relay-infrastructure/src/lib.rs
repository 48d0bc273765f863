//! # Relay - Infrastructure Layer
//!
//! Cross-cutting technical concerns and the composition root.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Figment-based layered configuration |
//! | [`logging`] | Tracing subscriber setup |
//! | [`error_ext`] | Context extension for foreign errors |
//! | [`repository`] | In-memory provider repository |
//! | [`credentials`] | In-memory credential store |
//! | [`policy`] | Category policy store |
//! | [`seed`] | Built-in provider catalogue and first-boot seeding |
//! | [`bootstrap`] | `AppContext` wiring |

// Adapters register through linkme; linking the crate is enough
extern crate relay_providers;

pub mod bootstrap;
pub mod config;
pub mod constants;
pub mod credentials;
pub mod error_ext;
pub mod logging;
pub mod policy;
pub mod repository;
pub mod seed;

pub use bootstrap::{AppContext, init_app, init_app_with};
pub use config::{AppConfig, ConfigLoader};
pub use logging::init_logging;
