//! Domain Value Objects
//!
//! Immutable value objects that represent concepts in the domain
//! without identity.
//!
//! ## Value Objects
//!
//! | Value Object | Description |
//! |--------------|-------------|
//! | [`OrchestrationRequest`] | One capability request with timeout and retry budget |
//! | [`OrchestrationResult`] | Structured outcome, never an exception |
//! | [`AttemptOutcome`] | Normalized `(success, data, error)` triple returned by adapters |
//! | [`ProviderStatus`] | Derived operator-facing status |
//! | [`CategoryPolicy`] | Per-category allow switches |
//! | [`UsageReport`] | Outcome fed to the circuit breaker |
//! | [`RotationOutcome`] | Previous and new default after rotation |

/// Request, result and attempt value objects
pub mod orchestration;
/// Category policy and breaker thresholds
pub mod policy;
/// Rotation outcome
pub mod rotation;
/// Derived provider status
pub mod status;
/// Usage report and effect
pub mod usage;

use std::collections::HashMap;

/// Named secrets for one provider
pub type Credentials = HashMap<String, String>;

pub use orchestration::{
    AttemptOutcome, AttemptRecord, OrchestrationMetadata, OrchestrationRequest,
    OrchestrationResult, OrchestrationStatus, Payload, SkippedProvider,
};
pub use policy::{CategoryPolicy, CircuitBreakerPolicy};
pub use rotation::{ProviderRef, RotationOutcome};
pub use status::ProviderStatus;
pub use usage::{UsageEffect, UsageReport};
