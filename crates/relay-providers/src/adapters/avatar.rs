//! Avatar Generation Adapter
//!
//! Submits talking-avatar jobs to D-ID (primary engine) or HeyGen (fallback).
//! Rendering itself happens at the vendor; the adapter returns the job handle:
//!
//! ```json
//! { "job_id", "status", "engine" }
//! ```
//!
//! Payload: `script` (required), `source_url` (D-ID presenter image),
//! `avatar_id` and `voice_id` (HeyGen). Missing ids fall back to the
//! provider configuration `options`.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use relay_application::ports::registry::{AdapterContext, CAPABILITY_ADAPTERS, CapabilityAdapterEntry};
use relay_domain::constants::CAPABILITY_AVATAR_GENERATION;
use relay_domain::entities::Provider;
use relay_domain::error::AttemptError;
use relay_domain::ports::CapabilityAdapter;
use relay_domain::value_objects::{AttemptOutcome, Credentials, Payload};
use serde_json::{Value, json};

use crate::constants::{DID_BASE_URL, HEYGEN_BASE_URL};
use crate::http::{HttpHarness, VendorCall, VendorConfig};
use crate::utils::JsonExt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AvatarEngine {
    DId,
    HeyGen,
}

impl AvatarEngine {
    fn parse(name: &str) -> Result<Self, AttemptError> {
        match name.to_ascii_lowercase().as_str() {
            "d-id" | "did" => Ok(Self::DId),
            "heygen" => Ok(Self::HeyGen),
            other => Err(AttemptError::configuration(format!(
                "unsupported avatar engine '{other}'"
            ))),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::DId => "d-id",
            Self::HeyGen => "heygen",
        }
    }
}

fn setting<'a>(payload: &'a Payload, config: &'a VendorConfig, key: &str) -> Result<&'a str, AttemptError> {
    payload
        .opt_str(key)
        .or_else(|| config.option_str(key))
        .ok_or_else(|| AttemptError::invalid_payload(format!("'{key}' is required")))
}

/// Talking-avatar job adapter
pub struct AvatarAdapter {
    http: HttpHarness,
}

impl AvatarAdapter {
    /// Create the adapter
    pub fn new(http: HttpHarness) -> Self {
        Self { http }
    }

    async fn submit(
        &self,
        provider: &Provider,
        payload: &Payload,
        timeout: Duration,
    ) -> Result<Value, AttemptError> {
        let config = VendorConfig::from_provider(provider)?;
        let engine = AvatarEngine::parse(config.vendor(provider))?;
        let script = payload.required_str("script")?;
        let call = VendorCall {
            provider,
            config: &config,
            timeout,
        };

        let (job_id, status) = match engine {
            AvatarEngine::DId => {
                let body = json!({
                    "source_url": setting(payload, &config, "source_url")?,
                    "script": { "type": "text", "input": script },
                });
                let url = format!("{}/talks", config.base_url(DID_BASE_URL));
                let response = self.http.post_json(&call, &url, &body).await?;
                (
                    response.opt_str("id").map(str::to_string),
                    response.str_or("status", "created").to_string(),
                )
            }
            AvatarEngine::HeyGen => {
                let body = json!({
                    "video_inputs": [{
                        "character": {
                            "type": "avatar",
                            "avatar_id": setting(payload, &config, "avatar_id")?,
                        },
                        "voice": {
                            "type": "text",
                            "input_text": script,
                            "voice_id": setting(payload, &config, "voice_id")?,
                        },
                    }],
                });
                let url = format!("{}/v2/video/generate", config.base_url(HEYGEN_BASE_URL));
                let response = self.http.post_json(&call, &url, &body).await?;
                (
                    response["data"].opt_str("video_id").map(str::to_string),
                    "processing".to_string(),
                )
            }
        };

        let job_id = job_id.ok_or_else(|| AttemptError::invalid_response("response carried no job id"))?;
        Ok(json!({
            "job_id": job_id,
            "status": status,
            "engine": engine.name(),
        }))
    }
}

#[async_trait]
impl CapabilityAdapter for AvatarAdapter {
    fn capability(&self) -> &str {
        CAPABILITY_AVATAR_GENERATION
    }

    async fn attempt(
        &self,
        provider: &Provider,
        payload: &Payload,
        timeout: Duration,
    ) -> AttemptOutcome {
        self.submit(provider, payload, timeout).await.into()
    }

    fn credentials(&self, provider_key: &str) -> Option<Credentials> {
        self.http.credentials(provider_key)
    }
}

fn avatar_factory(context: &AdapterContext) -> std::result::Result<Arc<dyn CapabilityAdapter>, String> {
    Ok(Arc::new(AvatarAdapter::new(HttpHarness::new(context)?)))
}

#[linkme::distributed_slice(CAPABILITY_ADAPTERS)]
static AVATAR_ADAPTER: CapabilityAdapterEntry = CapabilityAdapterEntry {
    capability: CAPABILITY_AVATAR_GENERATION,
    description: "Talking-avatar video jobs (D-ID primary, HeyGen fallback)",
    factory: avatar_factory,
};
