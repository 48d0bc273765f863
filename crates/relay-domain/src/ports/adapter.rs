//! Capability Adapter Port
//!
//! The only contract the orchestration core depends on. One adapter serves one
//! capability family (images, news, weather, pets, avatar-generation) and
//! hides every vendor-specific HTTP shape behind [`CapabilityAdapter::attempt`].
//!
//! ## Contract
//!
//! | Method | Rule |
//! |--------|------|
//! | `attempt` | One network call; every failure is returned as `success = false`, never raised |
//! | `credentials` | `None` or only blank secrets means the engine skips the provider |
//! | `is_eligible` | Evaluated before considering a provider; category policy is checked here |

use std::time::Duration;

use async_trait::async_trait;

use crate::entities::Provider;
use crate::value_objects::{AttemptOutcome, CategoryPolicy, Credentials, Payload};

/// Adapter turning a generic payload into a concrete vendor call
#[async_trait]
pub trait CapabilityAdapter: Send + Sync {
    /// Capability served by this adapter
    fn capability(&self) -> &str;

    /// Perform one call against `provider` within `timeout`
    async fn attempt(
        &self,
        provider: &Provider,
        payload: &Payload,
        timeout: Duration,
    ) -> AttemptOutcome;

    /// Resolve stored secrets for a provider id
    fn credentials(&self, provider_key: &str) -> Option<Credentials>;

    /// Whether at least one non-empty secret is stored for a provider id
    fn has_credentials(&self, provider_key: &str) -> bool {
        self.credentials(provider_key)
            .is_some_and(|creds| creds.values().any(|v| !v.is_empty()))
    }

    /// Whether `provider` may be considered under `policy`
    fn is_eligible(&self, provider: &Provider, policy: &CategoryPolicy) -> bool {
        provider
            .category
            .as_deref()
            .is_none_or(|category| policy.is_allowed(category))
    }
}
