//! Main application configuration

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::logging::LoggingConfig;
use super::orchestration::{CircuitBreakerConfig, HttpConfig, OrchestrationConfig};
use super::providers::ProviderConfig;
use super::server::{AdminConfig, ServerConfig};

/// Secrets per provider id, then per credential name
pub type CredentialsConfig = BTreeMap<String, BTreeMap<String, String>>;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Logging configuration
    pub logging: LoggingConfig,
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Admin API protection
    pub admin: AdminConfig,
    /// Request defaults and engine settings
    pub orchestration: OrchestrationConfig,
    /// Circuit breaker thresholds
    pub circuit_breaker: CircuitBreakerConfig,
    /// Outbound HTTP client settings
    pub http: HttpConfig,
    /// Initial credentials
    pub credentials: CredentialsConfig,
    /// Provider seed; the built-in catalogue when empty
    pub providers: Vec<ProviderConfig>,
}
