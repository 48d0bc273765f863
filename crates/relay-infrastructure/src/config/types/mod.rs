//! Configuration types grouped by section

pub mod app;
pub mod logging;
pub mod orchestration;
pub mod providers;
pub mod server;

pub use app::{AppConfig, CredentialsConfig};
pub use logging::LoggingConfig;
pub use orchestration::{CircuitBreakerConfig, HttpConfig, OrchestrationConfig};
pub use providers::ProviderConfig;
pub use server::{AdminConfig, ServerConfig};
