//! Application ports
//!
//! Domain ports are re-exported for convenience; the adapter registry slice
//! lives in [`registry`].

/// Capability adapter registry
pub mod registry;

pub use registry::*;
pub use relay_domain::ports::{
    CapabilityAdapter, CredentialStore, PolicyStore, ProviderMutation, ProviderRepository,
    ProviderUpdate,
};
