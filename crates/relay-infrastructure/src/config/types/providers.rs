//! Provider seed configuration

use relay_domain::entities::{AuthenticationType, Provider, RateLimits};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One provider declared in configuration
///
/// ```toml
/// [[providers]]
/// id = "pixabay"
/// name = "Pixabay"
/// capability = "images"
/// priority = 2
/// authentication_type = "api_key"
/// rate_limits = { per_day = 5000 }
/// configuration = { key_param = "key" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Stable identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Capability served
    pub capability: String,
    /// Restricted category, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Selection priority (1 = primary)
    #[serde(default = "default_priority")]
    pub priority: u32,
    /// Whether the provider starts enabled
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Whether the circuit breaker may disable it
    #[serde(default = "default_true")]
    pub auto_disable: bool,
    /// Request caps per window
    #[serde(default)]
    pub rate_limits: RateLimits,
    /// How credentials are presented
    #[serde(default)]
    pub authentication_type: AuthenticationType,
    /// Vendor configuration read by the adapter
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub configuration: Value,
}

fn default_priority() -> u32 {
    1
}

fn default_true() -> bool {
    true
}

impl ProviderConfig {
    /// Declare a provider with defaults for every optional field
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        capability: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            capability: capability.into(),
            category: None,
            priority: default_priority(),
            enabled: true,
            auto_disable: true,
            rate_limits: RateLimits::default(),
            authentication_type: AuthenticationType::None,
            configuration: Value::Null,
        }
    }

    /// Set the priority
    #[must_use]
    pub fn priority(mut self, priority: u32) -> Self {
        self.priority = priority;
        self
    }

    /// Set the authentication scheme
    #[must_use]
    pub fn auth(mut self, authentication_type: AuthenticationType) -> Self {
        self.authentication_type = authentication_type;
        self
    }

    /// Set the daily cap
    #[must_use]
    pub fn per_day(mut self, limit: u64) -> Self {
        self.rate_limits.per_day = Some(limit);
        self
    }

    /// Set the per-minute cap
    #[must_use]
    pub fn per_minute(mut self, limit: u64) -> Self {
        self.rate_limits.per_minute = Some(limit);
        self
    }

    /// Set the vendor configuration
    #[must_use]
    pub fn configuration(mut self, configuration: Value) -> Self {
        self.configuration = configuration;
        self
    }

    /// Build the registry record
    pub fn into_provider(self) -> Provider {
        let mut provider = Provider::new(self.id, self.name, self.capability)
            .with_priority(self.priority)
            .with_rate_limits(self.rate_limits)
            .with_auto_disable(self.auto_disable)
            .with_authentication(self.authentication_type)
            .with_configuration(self.configuration);
        if let Some(category) = self.category {
            provider = provider.with_category(category);
        }
        provider.enabled = self.enabled;
        provider
    }
}
