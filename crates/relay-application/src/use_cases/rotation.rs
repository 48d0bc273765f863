//! Rotation Controller
//!
//! Moves the standing default of a capability to the next enabled provider in
//! priority order, wrapping after the last. Rotation only changes which
//! provider is reported as the default; per-request failover is unaffected.

use relay_domain::error::{Error, Result};
use relay_domain::value_objects::{ProviderRef, RotationOutcome};
use tokio::sync::Mutex;
use tracing::info;

use crate::domain_services::ProviderRegistry;
use crate::domain_services::registry::current_default;

/// Serialized default rotation
pub struct RotationController {
    registry: ProviderRegistry,
    lock: Mutex<()>,
}

impl RotationController {
    /// Create a controller
    pub fn new(registry: ProviderRegistry) -> Self {
        Self {
            registry,
            lock: Mutex::new(()),
        }
    }

    /// Advance the default of `capability` to the next provider
    pub async fn rotate(&self, capability: &str) -> Result<RotationOutcome> {
        let _guard = self.lock.lock().await;

        let enabled = self.registry.enabled_by_priority(capability).await?;
        if enabled.len() < 2 {
            return Err(Error::no_alternatives(capability));
        }

        let marked = self.registry.repository().default_for(capability).await?;
        let current = current_default(&enabled, marked.as_deref()).unwrap_or(0);
        let next = (current + 1) % enabled.len();

        let previous = &enabled[current];
        let chosen = &enabled[next];
        self.registry
            .repository()
            .set_default(capability, &chosen.id)
            .await?;

        info!(
            capability,
            previous = %previous.name,
            current = %chosen.name,
            "Default provider rotated"
        );

        Ok(RotationOutcome {
            capability: capability.to_string(),
            previous: ProviderRef {
                id: previous.id.clone(),
                name: previous.name.clone(),
            },
            current: ProviderRef {
                id: chosen.id.clone(),
                name: chosen.name.clone(),
            },
        })
    }
}
