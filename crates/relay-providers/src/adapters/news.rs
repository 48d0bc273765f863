//! News Adapter
//!
//! Serves the `news` capability from NewsAPI or GNews. Payload: `query`
//! (optional; top headlines when absent), `country` (default `us`),
//! `page_size` (default 10).

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use relay_application::ports::registry::{AdapterContext, CAPABILITY_ADAPTERS, CapabilityAdapterEntry};
use relay_domain::constants::CAPABILITY_NEWS;
use relay_domain::entities::Provider;
use relay_domain::error::AttemptError;
use relay_domain::ports::CapabilityAdapter;
use relay_domain::value_objects::{AttemptOutcome, Credentials, Payload};
use serde_json::{Value, json};

use super::page_size;
use crate::constants::{GNEWS_BASE_URL, NEWSAPI_BASE_URL};
use crate::http::{HttpHarness, VendorCall, VendorConfig};
use crate::utils::JsonExt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NewsVendor {
    NewsApi,
    GNews,
}

impl NewsVendor {
    fn parse(name: &str) -> Result<Self, AttemptError> {
        match name.to_ascii_lowercase().as_str() {
            "newsapi" => Ok(Self::NewsApi),
            "gnews" => Ok(Self::GNews),
            other => Err(AttemptError::configuration(format!(
                "unsupported news vendor '{other}'"
            ))),
        }
    }
}

/// NewsAPI reports quota and key problems with HTTP 200 and `status: error`
fn check_body(body: &Value) -> Result<(), AttemptError> {
    if body.str_or("status", "ok") != "error" {
        return Ok(());
    }
    let code = body.str_or("code", "unknown");
    let message = body.str_or("message", code).to_string();
    if code == "rateLimited" {
        Err(AttemptError::RateLimited { message })
    } else {
        Err(AttemptError::invalid_response(format!("{code}: {message}")))
    }
}

fn normalize(body: &Value) -> Vec<Value> {
    body.array_at("articles")
        .iter()
        .map(|a| {
            json!({
                "title": a.str_or("title", ""),
                "description": a.str_or("description", ""),
                "url": a.str_or("url", ""),
                "source": a["source"].str_or("name", ""),
                "published_at": a.str_or("publishedAt", ""),
            })
        })
        .collect()
}

/// News adapter
pub struct NewsAdapter {
    http: HttpHarness,
}

impl NewsAdapter {
    /// Create the adapter
    pub fn new(http: HttpHarness) -> Self {
        Self { http }
    }

    async fn fetch(
        &self,
        provider: &Provider,
        payload: &Payload,
        timeout: Duration,
    ) -> Result<Value, AttemptError> {
        let config = VendorConfig::from_provider(provider)?;
        let vendor = NewsVendor::parse(config.vendor(provider))?;
        let query = payload.opt_str("query").map(str::to_string);
        let country = payload
            .opt_str("country")
            .or_else(|| config.option_str("country"))
            .unwrap_or("us")
            .to_string();
        let size = page_size(payload, "page_size").to_string();
        let call = VendorCall {
            provider,
            config: &config,
            timeout,
        };

        let body = match vendor {
            NewsVendor::NewsApi => {
                let base = config.base_url(NEWSAPI_BASE_URL);
                match &query {
                    Some(q) => {
                        self.http
                            .get_json(
                                &call,
                                &format!("{base}/everything"),
                                &[("q", q.clone()), ("pageSize", size)],
                            )
                            .await?
                    }
                    None => {
                        self.http
                            .get_json(
                                &call,
                                &format!("{base}/top-headlines"),
                                &[("country", country), ("pageSize", size)],
                            )
                            .await?
                    }
                }
            }
            NewsVendor::GNews => {
                let base = config.base_url(GNEWS_BASE_URL);
                match &query {
                    Some(q) => {
                        self.http
                            .get_json(
                                &call,
                                &format!("{base}/search"),
                                &[("q", q.clone()), ("max", size)],
                            )
                            .await?
                    }
                    None => {
                        self.http
                            .get_json(
                                &call,
                                &format!("{base}/top-headlines"),
                                &[("country", country), ("max", size)],
                            )
                            .await?
                    }
                }
            }
        };

        check_body(&body)?;
        let articles = normalize(&body);
        Ok(json!({
            "count": articles.len(),
            "articles": articles,
            "query": query,
        }))
    }
}

#[async_trait]
impl CapabilityAdapter for NewsAdapter {
    fn capability(&self) -> &str {
        CAPABILITY_NEWS
    }

    async fn attempt(
        &self,
        provider: &Provider,
        payload: &Payload,
        timeout: Duration,
    ) -> AttemptOutcome {
        self.fetch(provider, payload, timeout).await.into()
    }

    fn credentials(&self, provider_key: &str) -> Option<Credentials> {
        self.http.credentials(provider_key)
    }
}

fn news_factory(context: &AdapterContext) -> std::result::Result<Arc<dyn CapabilityAdapter>, String> {
    Ok(Arc::new(NewsAdapter::new(HttpHarness::new(context)?)))
}

#[linkme::distributed_slice(CAPABILITY_ADAPTERS)]
static NEWS_ADAPTER: CapabilityAdapterEntry = CapabilityAdapterEntry {
    capability: CAPABILITY_NEWS,
    description: "News headlines and search (NewsAPI, GNews)",
    factory: news_factory,
};
