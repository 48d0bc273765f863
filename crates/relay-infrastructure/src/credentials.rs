//! In-memory credential store

use dashmap::DashMap;
use relay_domain::ports::CredentialStore;
use relay_domain::value_objects::Credentials;

use crate::config::CredentialsConfig;

/// Secrets per provider id held in process memory
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    secrets: DashMap<String, Credentials>,
}

impl InMemoryCredentialStore {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded from configuration; blank values are ignored
    pub fn from_config(config: &CredentialsConfig) -> Self {
        let store = Self::new();
        for (provider_id, names) in config {
            for (name, value) in names {
                if !value.trim().is_empty() {
                    store.upsert(provider_id, name, value);
                }
            }
        }
        store
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn get(&self, provider_id: &str) -> Option<Credentials> {
        self.secrets.get(provider_id).map(|c| c.value().clone())
    }

    fn upsert(&self, provider_id: &str, name: &str, value: &str) {
        self.secrets
            .entry(provider_id.to_string())
            .or_default()
            .insert(name.to_string(), value.to_string());
    }
}
