//! Use Cases
//!
//! | Use case | Description |
//! |----------|-------------|
//! | [`OrchestrationEngine`] | Per-request selection, retry and failover |
//! | [`RotationController`] | Advances the standing default of a capability |
//! | [`AdminService`] | Administrative surface over the registry |

/// Administrative operations
pub mod admin;
/// Orchestration engine
pub mod orchestration;
/// Default rotation
pub mod rotation;

pub use admin::{AdminService, ProviderView};
pub use orchestration::{OrchestrationEngine, OrchestrationSettings};
pub use rotation::RotationController;
