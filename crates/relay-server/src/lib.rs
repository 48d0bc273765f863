//! # Relay - HTTP Surface
//!
//! Rocket application exposing the orchestrator and its administrative API.
//! Handlers are thin: they parse the body, call the [`AppContext`] use cases
//! and map domain errors onto statuses.
//!
//! [`AppContext`]: relay_infrastructure::AppContext

pub mod auth;
pub mod catchers;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod server;

pub use auth::{AdminAuth, AdminAuthConfig};
pub use error::{ApiError, ErrorBody};
pub use routes::{api_routes, relay_rocket, relay_rocket_with_auth};
pub use server::{rocket_config, serve, serve_with_shutdown};
