//! Image Search Adapter
//!
//! Serves the `images` capability from Unsplash, Pixabay or Pexels and
//! normalizes every vendor to:
//!
//! ```json
//! { "images": [{ "url", "thumbnail", "author", "source_url" }], "count", "query" }
//! ```
//!
//! Payload: `query` (required), `per_page` (optional, default 10).

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use relay_application::ports::registry::{AdapterContext, CAPABILITY_ADAPTERS, CapabilityAdapterEntry};
use relay_domain::constants::CAPABILITY_IMAGES;
use relay_domain::entities::Provider;
use relay_domain::error::AttemptError;
use relay_domain::ports::CapabilityAdapter;
use relay_domain::value_objects::{AttemptOutcome, Credentials, Payload};
use serde_json::{Value, json};

use super::page_size;
use crate::constants::{PEXELS_BASE_URL, PIXABAY_BASE_URL, UNSPLASH_BASE_URL};
use crate::http::{HttpHarness, VendorCall, VendorConfig};
use crate::utils::JsonExt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ImageVendor {
    Unsplash,
    Pixabay,
    Pexels,
}

impl ImageVendor {
    fn parse(name: &str) -> Result<Self, AttemptError> {
        match name.to_ascii_lowercase().as_str() {
            "unsplash" => Ok(Self::Unsplash),
            "pixabay" => Ok(Self::Pixabay),
            "pexels" => Ok(Self::Pexels),
            other => Err(AttemptError::configuration(format!(
                "unsupported image vendor '{other}'"
            ))),
        }
    }

    fn default_base_url(self) -> &'static str {
        match self {
            Self::Unsplash => UNSPLASH_BASE_URL,
            Self::Pixabay => PIXABAY_BASE_URL,
            Self::Pexels => PEXELS_BASE_URL,
        }
    }
}

fn image(url: &str, thumbnail: &str, author: &str, source_url: &str) -> Value {
    json!({
        "url": url,
        "thumbnail": thumbnail,
        "author": author,
        "source_url": source_url,
    })
}

fn normalize(vendor: ImageVendor, body: &Value) -> Vec<Value> {
    match vendor {
        ImageVendor::Unsplash => body
            .array_at("results")
            .iter()
            .map(|r| {
                image(
                    r["urls"].str_or("regular", ""),
                    r["urls"].str_or("thumb", ""),
                    r["user"].str_or("name", ""),
                    r["links"].str_or("html", ""),
                )
            })
            .collect(),
        ImageVendor::Pixabay => body
            .array_at("hits")
            .iter()
            .map(|h| {
                image(
                    h.str_or("largeImageURL", ""),
                    h.str_or("previewURL", ""),
                    h.str_or("user", ""),
                    h.str_or("pageURL", ""),
                )
            })
            .collect(),
        ImageVendor::Pexels => body
            .array_at("photos")
            .iter()
            .map(|p| {
                image(
                    p["src"].str_or("large", ""),
                    p["src"].str_or("tiny", ""),
                    p.str_or("photographer", ""),
                    p.str_or("url", ""),
                )
            })
            .collect(),
    }
}

/// Image search adapter
pub struct ImageSearchAdapter {
    http: HttpHarness,
}

impl ImageSearchAdapter {
    /// Create the adapter
    pub fn new(http: HttpHarness) -> Self {
        Self { http }
    }

    async fn search(
        &self,
        provider: &Provider,
        payload: &Payload,
        timeout: Duration,
    ) -> Result<Value, AttemptError> {
        let config = VendorConfig::from_provider(provider)?;
        let vendor = ImageVendor::parse(config.vendor(provider))?;
        let query = payload.required_str("query")?.to_string();
        let per_page = page_size(payload, "per_page").to_string();
        let base = config.base_url(vendor.default_base_url());
        let call = VendorCall {
            provider,
            config: &config,
            timeout,
        };

        let body = match vendor {
            ImageVendor::Unsplash => {
                self.http
                    .get_json(
                        &call,
                        &format!("{base}/search/photos"),
                        &[("query", query.clone()), ("per_page", per_page)],
                    )
                    .await?
            }
            ImageVendor::Pixabay => {
                self.http
                    .get_json(
                        &call,
                        &format!("{base}/"),
                        &[
                            ("q", query.clone()),
                            ("per_page", per_page),
                            ("image_type", "photo".to_string()),
                        ],
                    )
                    .await?
            }
            ImageVendor::Pexels => {
                self.http
                    .get_json(
                        &call,
                        &format!("{base}/search"),
                        &[("query", query.clone()), ("per_page", per_page)],
                    )
                    .await?
            }
        };

        let images = normalize(vendor, &body);
        Ok(json!({
            "count": images.len(),
            "images": images,
            "query": query,
        }))
    }
}

#[async_trait]
impl CapabilityAdapter for ImageSearchAdapter {
    fn capability(&self) -> &str {
        CAPABILITY_IMAGES
    }

    async fn attempt(
        &self,
        provider: &Provider,
        payload: &Payload,
        timeout: Duration,
    ) -> AttemptOutcome {
        self.search(provider, payload, timeout).await.into()
    }

    fn credentials(&self, provider_key: &str) -> Option<Credentials> {
        self.http.credentials(provider_key)
    }
}

// ============================================================================
// Auto-registration via linkme
// ============================================================================

fn image_search_factory(
    context: &AdapterContext,
) -> std::result::Result<Arc<dyn CapabilityAdapter>, String> {
    Ok(Arc::new(ImageSearchAdapter::new(HttpHarness::new(context)?)))
}

#[linkme::distributed_slice(CAPABILITY_ADAPTERS)]
static IMAGE_SEARCH_ADAPTER: CapabilityAdapterEntry = CapabilityAdapterEntry {
    capability: CAPABILITY_IMAGES,
    description: "Image search (Unsplash, Pixabay, Pexels)",
    factory: image_search_factory,
};
