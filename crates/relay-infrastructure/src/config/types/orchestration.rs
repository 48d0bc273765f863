//! Orchestration, circuit breaker and outbound HTTP configuration types

use std::time::Duration;

use relay_application::{AdapterSettings, OrchestrationSettings};
use relay_domain::constants::{
    AUTO_DISABLE_ERROR_THRESHOLD, CAPABILITY_AVATAR_GENERATION, DEFAULT_MAX_RETRIES,
    DEFAULT_TIMEOUT_MS, DEGRADED_ERROR_THRESHOLD, ERROR_MESSAGE_MAX_LEN,
};
use relay_domain::value_objects::{CircuitBreakerPolicy, OrchestrationRequest, Payload};
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_CONNECT_TIMEOUT_MS;

/// Request defaults and engine settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OrchestrationConfig {
    /// Per-attempt timeout when the caller gives none
    pub default_timeout_ms: u64,
    /// Attempt budget when the caller gives none
    pub default_max_retries: usize,
    /// Whether unlimited providers go first by default
    pub default_prefer_free: bool,
    /// Capabilities with a primary engine and a designated fallback
    pub primary_fallback_capabilities: Vec<String>,
}

impl Default for OrchestrationConfig {
    fn default() -> Self {
        Self {
            default_timeout_ms: DEFAULT_TIMEOUT_MS,
            default_max_retries: DEFAULT_MAX_RETRIES,
            default_prefer_free: false,
            primary_fallback_capabilities: vec![CAPABILITY_AVATAR_GENERATION.to_string()],
        }
    }
}

impl OrchestrationConfig {
    /// Engine settings
    pub fn settings(&self) -> OrchestrationSettings {
        OrchestrationSettings {
            primary_fallback_capabilities: self.primary_fallback_capabilities.clone(),
        }
    }

    /// A request carrying the configured defaults
    pub fn request(&self, capability: impl Into<String>, payload: Payload) -> OrchestrationRequest {
        OrchestrationRequest::new(capability, payload)
            .with_timeout(Duration::from_millis(self.default_timeout_ms))
            .with_max_retries(self.default_max_retries)
            .prefer_free(self.default_prefer_free)
    }
}

/// Circuit breaker thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CircuitBreakerConfig {
    /// Recent errors that disable an `auto_disable` provider
    pub auto_disable_threshold: u32,
    /// Recent errors reported as degraded health
    pub degraded_threshold: u32,
    /// Stored error message length cap
    pub error_message_max_len: usize,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            auto_disable_threshold: AUTO_DISABLE_ERROR_THRESHOLD,
            degraded_threshold: DEGRADED_ERROR_THRESHOLD,
            error_message_max_len: ERROR_MESSAGE_MAX_LEN,
        }
    }
}

impl From<&CircuitBreakerConfig> for CircuitBreakerPolicy {
    fn from(config: &CircuitBreakerConfig) -> Self {
        Self {
            auto_disable_threshold: config.auto_disable_threshold,
            degraded_threshold: config.degraded_threshold,
            error_message_max_len: config.error_message_max_len,
        }
    }
}

/// Outbound HTTP client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// `User-Agent` sent to vendors; the crate default when absent
    pub user_agent: Option<String>,
    /// TCP connect timeout
    pub connect_timeout_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: None,
            connect_timeout_ms: DEFAULT_CONNECT_TIMEOUT_MS,
        }
    }
}

impl From<&HttpConfig> for AdapterSettings {
    fn from(config: &HttpConfig) -> Self {
        let defaults = AdapterSettings::default();
        Self {
            user_agent: config.user_agent.clone().unwrap_or(defaults.user_agent),
            connect_timeout: Duration::from_millis(config.connect_timeout_ms),
        }
    }
}
