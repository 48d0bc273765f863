//! In-memory provider repository
//!
//! Records live in a `DashMap` keyed by id; each record sits behind its own
//! async mutex so concurrent updates of one provider serialize while updates
//! of different providers proceed in parallel. Listing order is the order of
//! first registration.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use relay_domain::entities::Provider;
use relay_domain::error::{Error, Result};
use relay_domain::ports::{ProviderMutation, ProviderRepository, ProviderUpdate};
use tokio::sync::Mutex;

struct Slot {
    sequence: u64,
    provider: Mutex<Provider>,
}

/// Process-local provider registry storage
#[derive(Default)]
pub struct InMemoryProviderRepository {
    providers: DashMap<String, Arc<Slot>>,
    defaults: DashMap<String, String>,
    sequence: AtomicU64,
}

impl InMemoryProviderRepository {
    /// Empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored providers
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Whether no provider is stored
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    fn slot(&self, id: &str) -> Option<Arc<Slot>> {
        self.providers.get(id).map(|s| Arc::clone(s.value()))
    }

    /// Slots in registration order; map guards are released before returning
    fn ordered_slots(&self) -> Vec<Arc<Slot>> {
        let mut slots: Vec<Arc<Slot>> = self
            .providers
            .iter()
            .map(|e| Arc::clone(e.value()))
            .collect();
        slots.sort_by_key(|s| s.sequence);
        slots
    }

    async fn snapshot(slots: Vec<Arc<Slot>>, capability: Option<&str>) -> Vec<Provider> {
        let mut out = Vec::with_capacity(slots.len());
        for slot in slots {
            let provider = slot.provider.lock().await;
            if capability.is_none_or(|c| provider.capability == c) {
                out.push(provider.clone());
            }
        }
        out
    }
}

#[async_trait]
impl ProviderRepository for InMemoryProviderRepository {
    async fn list(&self, capability: &str) -> Result<Vec<Provider>> {
        Ok(Self::snapshot(self.ordered_slots(), Some(capability)).await)
    }

    async fn list_all(&self) -> Result<Vec<Provider>> {
        Ok(Self::snapshot(self.ordered_slots(), None).await)
    }

    async fn get(&self, id: &str) -> Result<Option<Provider>> {
        match self.slot(id) {
            Some(slot) => Ok(Some(slot.provider.lock().await.clone())),
            None => Ok(None),
        }
    }

    async fn upsert(&self, provider: Provider) -> Result<Provider> {
        let existing = match self.providers.entry(provider.id.clone()) {
            Entry::Occupied(entry) => Arc::clone(entry.get()),
            Entry::Vacant(entry) => {
                let sequence = self.sequence.fetch_add(1, Ordering::Relaxed);
                entry.insert(Arc::new(Slot {
                    sequence,
                    provider: Mutex::new(provider.clone()),
                }));
                return Ok(provider);
            }
        };

        let mut current = existing.provider.lock().await;
        let usage = current.usage;
        let enabled = current.enabled;
        let health = std::mem::take(&mut current.health);
        *current = provider;
        current.usage = usage;
        current.enabled = enabled;
        current.health = health;
        Ok(current.clone())
    }

    async fn update(&self, id: &str, mutation: ProviderMutation) -> Result<ProviderUpdate> {
        let slot = self
            .slot(id)
            .ok_or_else(|| Error::not_found(format!("provider {id}")))?;
        let mut provider = slot.provider.lock().await;
        let before = provider.clone();
        mutation(&mut provider);
        Ok(ProviderUpdate {
            before,
            after: provider.clone(),
        })
    }

    async fn default_for(&self, capability: &str) -> Result<Option<String>> {
        Ok(self.defaults.get(capability).map(|id| id.value().clone()))
    }

    async fn set_default(&self, capability: &str, id: &str) -> Result<Option<String>> {
        if self.slot(id).is_none() {
            return Err(Error::not_found(format!("provider {id}")));
        }
        Ok(self
            .defaults
            .insert(capability.to_string(), id.to_string()))
    }
}
