//! # Relay Domain Layer
//!
//! Core types for adaptive multi-provider request orchestration.
//!
//! ## Module Categories
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`entities`] | The `Provider` record with its policy, quota and health fields |
//! | [`value_objects`] | Requests, results, statuses, usage reports, category policy |
//! | [`ports`] | Contracts implemented by outer layers (adapters, repositories, stores) |
//! | [`error`] | `Error` for fallible operations, `AttemptError` for per-attempt failures |
//! | [`constants`] | Thresholds and capability names shared across layers |
//!
//! The domain crate has no knowledge of HTTP, persistence or configuration
//! formats. Those live in `relay-providers` and `relay-infrastructure`.

pub mod constants;
pub mod entities;
pub mod error;
pub mod ports;
pub mod utils;
pub mod value_objects;

pub use entities::Provider;
pub use error::{AttemptError, Error, Result};
