//! Shared fixtures for adapter tests

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use relay_application::ports::registry::AdapterContext;
use relay_domain::entities::{AuthenticationType, Provider};
use relay_domain::ports::CredentialStore;
use relay_domain::value_objects::{Credentials, Payload};
use relay_providers::HttpHarness;
use serde_json::{Value, json};

pub const TIMEOUT: Duration = Duration::from_secs(5);

/// In-memory credential store
#[derive(Default)]
pub struct TestCredentials {
    inner: Mutex<HashMap<String, Credentials>>,
}

impl TestCredentials {
    pub fn with(entries: &[(&str, &str, &str)]) -> Arc<Self> {
        let store = Self::default();
        for (provider, name, value) in entries {
            store.upsert(provider, name, value);
        }
        Arc::new(store)
    }
}

impl CredentialStore for TestCredentials {
    fn get(&self, provider_id: &str) -> Option<Credentials> {
        self.inner.lock().unwrap().get(provider_id).cloned()
    }

    fn upsert(&self, provider_id: &str, name: &str, value: &str) {
        self.inner
            .lock()
            .unwrap()
            .entry(provider_id.to_string())
            .or_default()
            .insert(name.to_string(), value.to_string());
    }
}

pub fn harness(credentials: Arc<TestCredentials>) -> HttpHarness {
    HttpHarness::new(&AdapterContext::new(credentials)).unwrap()
}

/// Provider pointing at the mock server
pub fn provider(id: &str, capability: &str, auth: AuthenticationType, config: Value) -> Provider {
    Provider::new(id, id, capability)
        .with_authentication(auth)
        .with_configuration(config)
}

pub fn payload(value: Value) -> Payload {
    match value {
        Value::Object(map) => map,
        _ => Payload::new(),
    }
}

pub fn base(url: &str) -> Value {
    json!({ "base_url": url })
}
