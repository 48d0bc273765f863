//! Provider Repository Port
//!
//! Registry storage behind an explicit per-provider update. Implementations
//! must apply [`ProviderRepository::update`] atomically per provider: two
//! concurrent updates of the same provider never observe the same `before`.

use async_trait::async_trait;

use crate::entities::Provider;
use crate::error::Result;

/// Mutation applied to one provider under its lock
pub type ProviderMutation = Box<dyn FnOnce(&mut Provider) + Send>;

/// Snapshot of a provider around one update
#[derive(Debug, Clone)]
pub struct ProviderUpdate {
    /// Record before the mutation
    pub before: Provider,
    /// Record after the mutation
    pub after: Provider,
}

/// Storage of provider records and per-capability defaults
#[async_trait]
pub trait ProviderRepository: Send + Sync {
    /// Providers of a capability in stable registration order
    async fn list(&self, capability: &str) -> Result<Vec<Provider>>;

    /// All providers in stable registration order
    async fn list_all(&self) -> Result<Vec<Provider>>;

    /// Provider by id
    async fn get(&self, id: &str) -> Result<Option<Provider>>;

    /// Insert, or replace policy fields of an existing provider
    ///
    /// Replacing keeps the registration order and the recorded usage, health
    /// and `enabled` flag of the existing record; only `set_enabled` turns a
    /// provider back on.
    async fn upsert(&self, provider: Provider) -> Result<Provider>;

    /// Apply `mutation` to one provider atomically
    async fn update(&self, id: &str, mutation: ProviderMutation) -> Result<ProviderUpdate>;

    /// Explicitly marked default provider id of a capability
    async fn default_for(&self, capability: &str) -> Result<Option<String>>;

    /// Mark `id` as the default of a capability, returning the previous mark
    async fn set_default(&self, capability: &str, id: &str) -> Result<Option<String>>;
}
