//! Provider Registry
//!
//! Computes which providers of a capability may be tried and in which order.
//!
//! ## Ordering
//!
//! | `prefer_free` | Sort key (ascending) |
//! |---------------|----------------------|
//! | `false` | `(load_factor, priority)` |
//! | `true` | `(has_day_limit, load_factor, priority)` |
//!
//! The sort is stable, so ties keep the repository's registration order.

use std::cmp::Ordering;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use relay_domain::entities::{HealthStatus, Provider, UsageWindow};
use relay_domain::error::Result;
use relay_domain::ports::ProviderRepository;

/// Whether `provider` may be selected at `now`
pub fn is_available(provider: &Provider, now: DateTime<Utc>) -> bool {
    provider.enabled
        && provider.health.status != HealthStatus::Unhealthy
        && provider.is_within_limit(UsageWindow::Day, now)
}

/// Filter to available providers and order them for selection
pub fn rank_available(
    providers: Vec<Provider>,
    prefer_free: bool,
    now: DateTime<Utc>,
) -> Vec<Provider> {
    let mut ranked: Vec<(f64, Provider)> = providers
        .into_iter()
        .filter(|p| is_available(p, now))
        .map(|p| (p.load_factor(now), p))
        .collect();

    ranked.sort_by(|(load_a, a), (load_b, b)| {
        let free = if prefer_free {
            a.has_day_limit().cmp(&b.has_day_limit())
        } else {
            Ordering::Equal
        };
        free.then_with(|| load_a.total_cmp(load_b))
            .then_with(|| a.priority.cmp(&b.priority))
    });

    ranked.into_iter().map(|(_, p)| p).collect()
}

/// Read side of the provider registry
#[derive(Clone)]
pub struct ProviderRegistry {
    repository: Arc<dyn ProviderRepository>,
}

impl ProviderRegistry {
    /// Create a registry over `repository`
    pub fn new(repository: Arc<dyn ProviderRepository>) -> Self {
        Self { repository }
    }

    /// Underlying repository
    pub fn repository(&self) -> &Arc<dyn ProviderRepository> {
        &self.repository
    }

    /// Available providers of `capability`, best first
    pub async fn list_available(&self, capability: &str, prefer_free: bool) -> Result<Vec<Provider>> {
        self.list_available_at(capability, prefer_free, Utc::now())
            .await
    }

    /// Available providers of `capability` as seen at `now`
    pub async fn list_available_at(
        &self,
        capability: &str,
        prefer_free: bool,
        now: DateTime<Utc>,
    ) -> Result<Vec<Provider>> {
        let providers = self.repository.list(capability).await?;
        Ok(rank_available(providers, prefer_free, now))
    }

    /// Fraction of the daily quota consumed
    pub fn load_factor(provider: &Provider) -> f64 {
        provider.load_factor(Utc::now())
    }

    /// Enabled providers of `capability` ordered by priority
    pub async fn enabled_by_priority(&self, capability: &str) -> Result<Vec<Provider>> {
        let mut providers: Vec<Provider> = self
            .repository
            .list(capability)
            .await?
            .into_iter()
            .filter(|p| p.enabled)
            .collect();
        providers.sort_by_key(|p| p.priority);
        Ok(providers)
    }

    /// Current default of `capability`
    ///
    /// The explicitly marked default when it is still enabled, otherwise the
    /// enabled provider with the lowest priority.
    pub async fn default_provider(&self, capability: &str) -> Result<Option<Provider>> {
        let enabled = self.enabled_by_priority(capability).await?;
        let marked = self.repository.default_for(capability).await?;
        Ok(current_default(&enabled, marked.as_deref()).map(|idx| enabled[idx].clone()))
    }
}

/// Index of the current default within priority-ordered enabled providers
pub(crate) fn current_default(enabled: &[Provider], marked: Option<&str>) -> Option<usize> {
    if enabled.is_empty() {
        return None;
    }
    let idx = marked
        .and_then(|id| enabled.iter().position(|p| p.id == id))
        .unwrap_or(0);
    Some(idx)
}
