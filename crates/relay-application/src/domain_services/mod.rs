//! Domain Services
//!
//! Stateless rules over provider records.
//!
//! | Service | Description |
//! |---------|-------------|
//! | [`ProviderRegistry`] | Availability filter, load factor and candidate ordering |
//! | [`HealthTracker`] | Derived operator status and health classification |
//! | [`UsageRecorder`] | Applies attempt outcomes to counters; trips the circuit breaker |

/// Provider health and status derivation
pub mod health;
/// Candidate selection
pub mod registry;
/// Usage recording and circuit breaking
pub mod usage;

pub use health::{HealthTracker, derive_status, health_from_errors};
pub use registry::{ProviderRegistry, is_available, rank_available};
pub use usage::{UsageRecorder, apply_usage};
