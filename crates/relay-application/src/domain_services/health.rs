//! Health tracking
//!
//! Status derivation is a pure function of the provider record and credential
//! presence. It runs on every listing, not only after attempts.

use std::sync::Arc;

use relay_domain::entities::{HealthStatus, Provider};
use relay_domain::ports::CredentialStore;
use relay_domain::value_objects::{CircuitBreakerPolicy, ProviderStatus};

/// Operator-facing status of `provider`
///
/// First match wins: disabled, missing credentials, degraded by errors, healthy.
pub fn derive_status(
    provider: &Provider,
    has_credentials: bool,
    auto_disable_threshold: u32,
) -> ProviderStatus {
    if !provider.enabled {
        ProviderStatus::Disabled
    } else if provider.requires_key && !has_credentials {
        ProviderStatus::MissingCredentials
    } else if provider.auto_disable && provider.health.recent_errors >= auto_disable_threshold {
        ProviderStatus::DegradedByErrors
    } else {
        ProviderStatus::Healthy
    }
}

/// Health classification after an attempt
///
/// `Unhealthy` is only ever set by an operator and is kept.
pub fn health_from_errors(
    current: HealthStatus,
    recent_errors: u32,
    degraded_threshold: u32,
) -> HealthStatus {
    match current {
        HealthStatus::Unhealthy => HealthStatus::Unhealthy,
        _ if recent_errors >= degraded_threshold => HealthStatus::Degraded,
        _ => HealthStatus::Healthy,
    }
}

/// Status derivation bound to a credential store
#[derive(Clone)]
pub struct HealthTracker {
    credentials: Arc<dyn CredentialStore>,
    policy: CircuitBreakerPolicy,
}

impl HealthTracker {
    /// Create a tracker
    pub fn new(credentials: Arc<dyn CredentialStore>, policy: CircuitBreakerPolicy) -> Self {
        Self {
            credentials,
            policy,
        }
    }

    /// Whether a credential is stored for `provider`
    pub fn has_credentials(&self, provider: &Provider) -> bool {
        self.credentials.has(&provider.id)
    }

    /// Operator-facing status of `provider`
    pub fn status(&self, provider: &Provider) -> ProviderStatus {
        derive_status(
            provider,
            self.has_credentials(provider),
            self.policy.auto_disable_threshold,
        )
    }
}
