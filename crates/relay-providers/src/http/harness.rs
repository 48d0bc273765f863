//! Shared HTTP harness for capability adapters
//!
//! Builds the reqwest client once per adapter, applies the provider's
//! authentication scheme and turns every vendor outcome into
//! `Result<Value, AttemptError>`.

use std::sync::Arc;
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use relay_application::ports::registry::{AdapterContext, AdapterSettings};
use relay_domain::entities::{AuthenticationType, Provider};
use relay_domain::error::AttemptError;
use relay_domain::ports::CredentialStore;
use relay_domain::value_objects::Credentials;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use tracing::debug;

use super::config::VendorConfig;
use crate::constants::{CONTENT_TYPE_JSON, CREDENTIAL_PASSWORD, CREDENTIAL_USERNAME};
use crate::utils::{HttpResponseUtils, map_send_error};

/// Build the shared HTTP client
pub fn build_client(settings: &AdapterSettings) -> Result<Client, String> {
    Client::builder()
        .user_agent(settings.user_agent.clone())
        .connect_timeout(settings.connect_timeout)
        .build()
        .map_err(|e| format!("Failed to create HTTP client: {e}"))
}

/// One vendor call being prepared
pub struct VendorCall<'a> {
    /// Provider being attempted
    pub provider: &'a Provider,
    /// Parsed configuration of the provider
    pub config: &'a VendorConfig,
    /// Hard upper bound for the call
    pub timeout: Duration,
}

/// HTTP client plus credential lookup shared by an adapter
#[derive(Clone)]
pub struct HttpHarness {
    client: Client,
    credentials: Arc<dyn CredentialStore>,
}

impl HttpHarness {
    /// Create a harness from the adapter context
    pub fn new(context: &AdapterContext) -> Result<Self, String> {
        Ok(Self {
            client: build_client(&context.settings)?,
            credentials: Arc::clone(&context.credentials),
        })
    }

    /// Stored secrets of a provider
    pub fn credentials(&self, provider_key: &str) -> Option<Credentials> {
        self.credentials.get(provider_key)
    }

    fn secret(&self, call: &VendorCall<'_>, name: &str) -> Result<String, AttemptError> {
        self.credentials(&call.provider.id)
            .and_then(|mut creds| creds.remove(name))
            .filter(|v| !v.is_empty())
            .ok_or_else(|| AttemptError::MissingCredentials {
                provider: call.provider.id.clone(),
            })
    }

    /// Apply the provider's authentication scheme to `request`
    pub fn authorize(
        &self,
        call: &VendorCall<'_>,
        request: RequestBuilder,
    ) -> Result<RequestBuilder, AttemptError> {
        let config = call.config;
        Ok(match call.provider.authentication_type {
            AuthenticationType::None => request,
            AuthenticationType::ApiKey => {
                let key = self.secret(call, config.credential_name())?;
                match config.key_param.as_deref() {
                    Some(param) => request.query(&[(param, key)]),
                    None => {
                        let prefix = config.key_prefix.as_deref().unwrap_or_default();
                        request.header(config.key_header(), format!("{prefix}{key}"))
                    }
                }
            }
            AuthenticationType::BearerToken => {
                let token = self.secret(call, config.credential_name())?;
                request.bearer_auth(token)
            }
            AuthenticationType::BasicAuth => {
                let encoded = match self.secret(call, CREDENTIAL_USERNAME) {
                    Ok(user) => {
                        let password = self.secret(call, CREDENTIAL_PASSWORD).unwrap_or_default();
                        STANDARD.encode(format!("{user}:{password}"))
                    }
                    // Some vendors hand out an already encoded basic token
                    Err(_) => self.secret(call, config.credential_name())?,
                };
                request.header(AUTHORIZATION, format!("Basic {encoded}"))
            }
        })
    }

    async fn send(
        &self,
        call: &VendorCall<'_>,
        request: RequestBuilder,
    ) -> Result<Value, AttemptError> {
        let response = self
            .authorize(call, request)?
            .timeout(call.timeout)
            .send()
            .await
            .map_err(|e| map_send_error(&e, call.timeout))?;
        debug!(
            provider = %call.provider.name,
            status = response.status().as_u16(),
            "Vendor responded"
        );
        HttpResponseUtils::check_and_parse(response, &call.provider.name).await
    }

    /// `GET url?query`
    pub async fn get_json(
        &self,
        call: &VendorCall<'_>,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<Value, AttemptError> {
        self.send(call, self.client.get(url).query(query)).await
    }

    /// `POST url` with a JSON body
    pub async fn post_json(
        &self,
        call: &VendorCall<'_>,
        url: &str,
        body: &Value,
    ) -> Result<Value, AttemptError> {
        let request = self
            .client
            .post(url)
            .header(CONTENT_TYPE, CONTENT_TYPE_JSON)
            .json(body);
        self.send(call, request).await
    }
}
