//! Admin Service
//!
//! Operations behind the administrative surface: listings with derived status,
//! enable/disable, credentials, external usage reports, rotation and category
//! policy.

use std::sync::Arc;

use chrono::Utc;
use relay_domain::entities::{HealthStatus, Provider};
use relay_domain::error::{Error, Result};
use relay_domain::ports::{CredentialStore, PolicyStore, ProviderRepository};
use relay_domain::value_objects::{
    CategoryPolicy, ProviderStatus, RotationOutcome, UsageEffect, UsageReport,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::rotation::RotationController;
use crate::domain_services::{HealthTracker, ProviderRegistry, UsageRecorder, is_available};

/// Provider record with its computed status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderView {
    /// Stored record
    #[serde(flatten)]
    pub provider: Provider,
    /// Derived operator status
    pub status: ProviderStatus,
    /// Whether this is the current default of its capability
    pub is_default: bool,
    /// Fraction of the daily quota consumed
    pub load_factor: f64,
    /// Whether selection would currently consider it
    pub available: bool,
}

/// Administrative operations
pub struct AdminService {
    repository: Arc<dyn ProviderRepository>,
    registry: ProviderRegistry,
    health: HealthTracker,
    recorder: UsageRecorder,
    rotation: Arc<RotationController>,
    credentials: Arc<dyn CredentialStore>,
    policy: Arc<dyn PolicyStore>,
}

impl AdminService {
    /// Create the service
    pub fn new(
        registry: ProviderRegistry,
        health: HealthTracker,
        recorder: UsageRecorder,
        rotation: Arc<RotationController>,
        credentials: Arc<dyn CredentialStore>,
        policy: Arc<dyn PolicyStore>,
    ) -> Self {
        Self {
            repository: Arc::clone(registry.repository()),
            registry,
            health,
            recorder,
            rotation,
            credentials,
            policy,
        }
    }

    async fn view(&self, provider: Provider) -> Result<ProviderView> {
        let default_id = self
            .registry
            .default_provider(&provider.capability)
            .await?
            .map(|p| p.id);
        Ok(self.view_with_default(provider, default_id.as_deref()))
    }

    fn view_with_default(&self, provider: Provider, default_id: Option<&str>) -> ProviderView {
        let now = Utc::now();
        ProviderView {
            status: self.health.status(&provider),
            is_default: default_id == Some(provider.id.as_str()),
            load_factor: provider.load_factor(now),
            available: is_available(&provider, now),
            provider,
        }
    }

    /// Providers of one capability, or of all capabilities
    pub async fn list_providers(&self, capability: Option<&str>) -> Result<Vec<ProviderView>> {
        let providers = match capability {
            Some(cap) => self.repository.list(cap).await?,
            None => self.repository.list_all().await?,
        };

        let mut views = Vec::with_capacity(providers.len());
        let mut defaults: Vec<(String, Option<String>)> = Vec::new();
        for provider in providers {
            let default_id = match defaults.iter().find(|(c, _)| *c == provider.capability) {
                Some((_, id)) => id.clone(),
                None => {
                    let id = self
                        .registry
                        .default_provider(&provider.capability)
                        .await?
                        .map(|p| p.id);
                    defaults.push((provider.capability.clone(), id.clone()));
                    id
                }
            };
            views.push(self.view_with_default(provider, default_id.as_deref()));
        }
        Ok(views)
    }

    /// One provider
    pub async fn get_provider(&self, id: &str) -> Result<ProviderView> {
        let provider = self
            .repository
            .get(id)
            .await?
            .ok_or_else(|| Error::not_found(format!("provider '{id}'")))?;
        self.view(provider).await
    }

    /// Register a provider or replace its policy fields
    pub async fn register_provider(&self, provider: Provider) -> Result<ProviderView> {
        for (field, value) in [
            ("id", &provider.id),
            ("name", &provider.name),
            ("capability", &provider.capability),
        ] {
            if value.trim().is_empty() {
                return Err(Error::invalid_argument(format!(
                    "provider {field} must not be empty"
                )));
            }
        }
        let stored = self.repository.upsert(provider).await?;
        info!(provider = %stored.name, capability = %stored.capability, "Provider registered");
        self.view(stored).await
    }

    /// Enable or disable a provider
    ///
    /// Enabling closes the circuit: recent errors are cleared and health goes
    /// back to `unknown`.
    pub async fn set_enabled(&self, id: &str, enabled: bool) -> Result<ProviderView> {
        let update = self
            .repository
            .update(
                id,
                Box::new(move |p: &mut Provider| {
                    p.enabled = enabled;
                    if enabled {
                        p.health.recent_errors = 0;
                        p.health.status = HealthStatus::Unknown;
                    }
                }),
            )
            .await?;
        info!(provider = %update.after.name, enabled, "Provider enablement changed");
        self.view(update.after).await
    }

    /// Override the health classification
    pub async fn set_health_status(&self, id: &str, status: HealthStatus) -> Result<ProviderView> {
        let now = Utc::now();
        let update = self
            .repository
            .update(
                id,
                Box::new(move |p: &mut Provider| {
                    p.health.status = status;
                    p.health.last_health_check = Some(now);
                }),
            )
            .await?;
        info!(provider = %update.after.name, %status, "Provider health overridden");
        self.view(update.after).await
    }

    /// Store one named secret for a provider
    pub async fn upsert_credential(&self, id: &str, name: &str, value: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(Error::invalid_argument("credential name must not be empty"));
        }
        if value.trim().is_empty() {
            return Err(Error::invalid_argument("credential value must not be empty"));
        }
        if self.repository.get(id).await?.is_none() {
            return Err(Error::not_found(format!("provider '{id}'")));
        }
        self.credentials.upsert(id, name, value);
        info!(provider = id, credential = name, "Credential stored");
        Ok(())
    }

    /// Feed one externally observed outcome into the circuit breaker
    pub async fn report_usage(&self, id: &str, report: UsageReport) -> Result<UsageEffect> {
        self.recorder.record(id, report).await
    }

    /// Rotate the default provider of a capability
    pub async fn rotate(&self, capability: &str) -> Result<RotationOutcome> {
        self.rotation.rotate(capability).await
    }

    /// Current category policy
    pub fn policy(&self) -> CategoryPolicy {
        self.policy.get()
    }

    /// Replace the category policy
    pub fn set_policy(&self, policy: CategoryPolicy) -> CategoryPolicy {
        info!(categories = ?policy.categories, "Category policy replaced");
        self.policy.set(policy.clone());
        policy
    }

    /// Allow or block one category
    pub fn set_category(&self, category: &str, allowed: bool) -> CategoryPolicy {
        let policy = self
            .policy
            .update(&|policy: &mut CategoryPolicy| policy.set(category, allowed));
        info!(category, allowed, "Category policy changed");
        policy
    }
}
