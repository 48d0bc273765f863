//! Capability Adapter Registry
//!
//! Auto-registration system for capability adapters using linkme distributed
//! slices. Adapters register themselves via `#[linkme::distributed_slice]` and
//! are instantiated once at startup into an [`AdapterRegistry`], which the
//! orchestration engine dispatches on by capability name.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use relay_domain::error::{Error, Result};
use relay_domain::ports::{CapabilityAdapter, CredentialStore};

/// HTTP client settings shared by adapters
#[derive(Debug, Clone)]
pub struct AdapterSettings {
    /// `User-Agent` header value
    pub user_agent: String,
    /// TCP connect timeout
    pub connect_timeout: Duration,
}

impl Default for AdapterSettings {
    fn default() -> Self {
        Self {
            user_agent: concat!("relay/", env!("CARGO_PKG_VERSION")).to_string(),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Everything an adapter factory may need
#[derive(Clone)]
pub struct AdapterContext {
    /// Credential lookup used by `CapabilityAdapter::credentials`
    pub credentials: Arc<dyn CredentialStore>,
    /// Shared HTTP settings
    pub settings: AdapterSettings,
}

impl AdapterContext {
    /// Create a context with default HTTP settings
    pub fn new(credentials: Arc<dyn CredentialStore>) -> Self {
        Self {
            credentials,
            settings: AdapterSettings::default(),
        }
    }

    /// Replace the HTTP settings
    #[must_use]
    pub fn with_settings(mut self, settings: AdapterSettings) -> Self {
        self.settings = settings;
        self
    }
}

/// Registry entry for capability adapters
///
/// Each adapter registers itself with this entry using
/// `#[linkme::distributed_slice(CAPABILITY_ADAPTERS)]`.
pub struct CapabilityAdapterEntry {
    /// Capability served (e.g., "images", "news")
    pub capability: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Factory function to create the adapter
    pub factory: fn(&AdapterContext) -> std::result::Result<Arc<dyn CapabilityAdapter>, String>,
}

// Auto-collection via linkme distributed slices - adapters submit entries at compile time
#[linkme::distributed_slice]
pub static CAPABILITY_ADAPTERS: [CapabilityAdapterEntry] = [..];

/// List all registered capability adapters as (capability, description)
pub fn list_capability_adapters() -> Vec<(&'static str, &'static str)> {
    let mut adapters: Vec<_> = CAPABILITY_ADAPTERS
        .iter()
        .map(|e| (e.capability, e.description))
        .collect();
    adapters.sort_unstable();
    adapters
}

/// Instantiated adapters keyed by capability
#[derive(Clone, Default)]
pub struct AdapterRegistry {
    adapters: HashMap<String, Arc<dyn CapabilityAdapter>>,
}

impl AdapterRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Instantiate every adapter registered in [`CAPABILITY_ADAPTERS`]
    pub fn from_entries(context: &AdapterContext) -> Result<Self> {
        let mut registry = Self::new();
        for entry in CAPABILITY_ADAPTERS {
            let adapter = (entry.factory)(context).map_err(|e| {
                Error::configuration(format!(
                    "failed to create adapter for capability '{}': {e}",
                    entry.capability
                ))
            })?;
            registry.register(adapter);
        }
        Ok(registry)
    }

    /// Add or replace the adapter for its capability
    pub fn register(&mut self, adapter: Arc<dyn CapabilityAdapter>) {
        self.adapters
            .insert(adapter.capability().to_string(), adapter);
    }

    /// Adapter serving `capability`
    pub fn get(&self, capability: &str) -> Option<Arc<dyn CapabilityAdapter>> {
        self.adapters.get(capability).cloned()
    }

    /// Served capabilities, sorted
    pub fn capabilities(&self) -> Vec<String> {
        let mut caps: Vec<String> = self.adapters.keys().cloned().collect();
        caps.sort();
        caps
    }
}

impl std::fmt::Debug for AdapterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdapterRegistry")
            .field("capabilities", &self.capabilities())
            .finish()
    }
}
