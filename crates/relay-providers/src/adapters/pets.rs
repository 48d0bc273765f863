//! Pets Adapter
//!
//! TheDogAPI and TheCatAPI share one response shape; both serve the `pets`
//! capability. Payload: `limit` (default 1). Output: `{ "images": [{ "id",
//! "url", "width", "height" }], "count", "animal" }`.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use relay_application::ports::registry::{AdapterContext, CAPABILITY_ADAPTERS, CapabilityAdapterEntry};
use relay_domain::constants::CAPABILITY_PETS;
use relay_domain::entities::Provider;
use relay_domain::error::AttemptError;
use relay_domain::ports::CapabilityAdapter;
use relay_domain::value_objects::{AttemptOutcome, Credentials, Payload};
use serde_json::{Value, json};

use crate::constants::{MAX_PAGE_SIZE, THECATAPI_BASE_URL, THEDOGAPI_BASE_URL};
use crate::http::{HttpHarness, VendorCall, VendorConfig};
use crate::utils::JsonExt;

fn vendor_root(name: &str) -> Result<(&'static str, &'static str), AttemptError> {
    match name.to_ascii_lowercase().as_str() {
        "thedogapi" => Ok(("dog", THEDOGAPI_BASE_URL)),
        "thecatapi" => Ok(("cat", THECATAPI_BASE_URL)),
        other => Err(AttemptError::configuration(format!(
            "unsupported pets vendor '{other}'"
        ))),
    }
}

/// Pet pictures adapter
pub struct PetsAdapter {
    http: HttpHarness,
}

impl PetsAdapter {
    /// Create the adapter
    pub fn new(http: HttpHarness) -> Self {
        Self { http }
    }

    async fn pictures(
        &self,
        provider: &Provider,
        payload: &Payload,
        timeout: Duration,
    ) -> Result<Value, AttemptError> {
        let config = VendorConfig::from_provider(provider)?;
        let (animal, default_base) = vendor_root(config.vendor(provider))?;
        let limit = payload.u64_or("limit", 1).clamp(1, MAX_PAGE_SIZE);
        let call = VendorCall {
            provider,
            config: &config,
            timeout,
        };

        let body = self
            .http
            .get_json(
                &call,
                &format!("{}/images/search", config.base_url(default_base)),
                &[("limit", limit.to_string())],
            )
            .await?;

        let entries = body
            .as_array()
            .ok_or_else(|| AttemptError::invalid_response("expected an array of images"))?;
        let images: Vec<Value> = entries
            .iter()
            .map(|e| {
                json!({
                    "id": e.str_or("id", ""),
                    "url": e.str_or("url", ""),
                    "width": e.u64_or("width", 0),
                    "height": e.u64_or("height", 0),
                })
            })
            .collect();

        Ok(json!({
            "count": images.len(),
            "images": images,
            "animal": animal,
        }))
    }
}

#[async_trait]
impl CapabilityAdapter for PetsAdapter {
    fn capability(&self) -> &str {
        CAPABILITY_PETS
    }

    async fn attempt(
        &self,
        provider: &Provider,
        payload: &Payload,
        timeout: Duration,
    ) -> AttemptOutcome {
        self.pictures(provider, payload, timeout).await.into()
    }

    fn credentials(&self, provider_key: &str) -> Option<Credentials> {
        self.http.credentials(provider_key)
    }
}

fn pets_factory(context: &AdapterContext) -> std::result::Result<Arc<dyn CapabilityAdapter>, String> {
    Ok(Arc::new(PetsAdapter::new(HttpHarness::new(context)?)))
}

#[linkme::distributed_slice(CAPABILITY_ADAPTERS)]
static PETS_ADAPTER: CapabilityAdapterEntry = CapabilityAdapterEntry {
    capability: CAPABILITY_PETS,
    description: "Dog and cat pictures (TheDogAPI, TheCatAPI)",
    factory: pets_factory,
};
