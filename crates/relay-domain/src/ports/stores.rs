//! Credential and policy store ports

use crate::value_objects::{CategoryPolicy, Credentials};

/// Named secrets per provider id
pub trait CredentialStore: Send + Sync {
    /// All secrets of a provider, `None` when nothing is stored
    fn get(&self, provider_id: &str) -> Option<Credentials>;

    /// Insert or replace one named secret
    fn upsert(&self, provider_id: &str, name: &str, value: &str);

    /// Whether at least one non-empty secret is stored
    fn has(&self, provider_id: &str) -> bool {
        self.get(provider_id)
            .is_some_and(|creds| creds.values().any(|v| !v.is_empty()))
    }
}

/// Current category policy
pub trait PolicyStore: Send + Sync {
    /// Snapshot of the policy
    fn get(&self) -> CategoryPolicy;

    /// Replace the policy
    fn set(&self, policy: CategoryPolicy);

    /// Apply `change` atomically to the current policy and return the result
    ///
    /// Concurrent updates are never lost; `change` may run more than once.
    fn update(&self, change: &dyn Fn(&mut CategoryPolicy)) -> CategoryPolicy;
}
