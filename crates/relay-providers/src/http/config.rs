//! Vendor configuration parsed from the provider's configuration blob

use relay_domain::entities::Provider;
use relay_domain::error::AttemptError;
use serde::Deserialize;

use crate::constants::{DEFAULT_API_KEY_HEADER, DEFAULT_CREDENTIAL_NAME};

/// Settings an adapter reads from `Provider::configuration`
///
/// ```json
/// { "vendor": "pixabay", "base_url": "https://pixabay.com/api", "key_param": "key" }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VendorConfig {
    /// Vendor identifier understood by the adapter; defaults to the provider id
    #[serde(default)]
    pub vendor: Option<String>,
    /// Overrides the vendor's public API root
    #[serde(default)]
    pub base_url: Option<String>,
    /// Send the API key as this query parameter instead of a header
    #[serde(default)]
    pub key_param: Option<String>,
    /// Header carrying the API key
    #[serde(default)]
    pub key_header: Option<String>,
    /// Prefix written before the key in the header value (e.g. `Client-ID `)
    #[serde(default)]
    pub key_prefix: Option<String>,
    /// Credential name holding the key
    #[serde(default)]
    pub credential: Option<String>,
    /// Vendor-specific defaults (avatar id, voice id, country...)
    #[serde(default)]
    pub options: serde_json::Map<String, serde_json::Value>,
}

impl VendorConfig {
    /// Parse the configuration of `provider`
    ///
    /// A null blob yields the defaults; anything else must match this shape.
    pub fn from_provider(provider: &Provider) -> Result<Self, AttemptError> {
        if provider.configuration.is_null() {
            return Ok(Self::default());
        }
        serde_json::from_value(provider.configuration.clone()).map_err(|e| {
            AttemptError::configuration(format!(
                "malformed configuration for provider {}: {e}",
                provider.id
            ))
        })
    }

    /// Vendor identifier, falling back to the provider id
    pub fn vendor<'a>(&'a self, provider: &'a Provider) -> &'a str {
        self.vendor.as_deref().unwrap_or(&provider.id)
    }

    /// API root, falling back to `default`
    pub fn base_url<'a>(&'a self, default: &'a str) -> &'a str {
        self.base_url
            .as_deref()
            .unwrap_or(default)
            .trim_end_matches('/')
    }

    /// Header carrying the API key
    pub fn key_header(&self) -> &str {
        self.key_header.as_deref().unwrap_or(DEFAULT_API_KEY_HEADER)
    }

    /// Credential name holding the key
    pub fn credential_name(&self) -> &str {
        self.credential.as_deref().unwrap_or(DEFAULT_CREDENTIAL_NAME)
    }

    /// String option
    pub fn option_str(&self, key: &str) -> Option<&str> {
        self.options.get(key).and_then(serde_json::Value::as_str)
    }
}
