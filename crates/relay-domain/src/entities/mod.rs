//! Domain Entities
//!
//! | Entity | Description |
//! |--------|-------------|
//! | [`Provider`] | Configured vendor with policy, rate limits, usage counters and health |

/// Provider entity and its embedded records
pub mod provider;

pub use provider::{
    AuthenticationType, HealthStatus, Provider, ProviderHealth, RateLimits, UsageCounters,
    UsageWindow, WindowUsage,
};
