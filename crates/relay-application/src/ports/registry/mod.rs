//! Provider Registry System
//!
//! Auto-registration of capability adapters via linkme distributed slices.

/// Capability adapter registry
pub mod adapters;

pub use adapters::{
    AdapterContext, AdapterRegistry, AdapterSettings, CAPABILITY_ADAPTERS,
    CapabilityAdapterEntry, list_capability_adapters,
};
