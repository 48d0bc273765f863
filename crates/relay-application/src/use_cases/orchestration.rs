//! Orchestration Engine
//!
//! Selection, retry and failover loop for one capability request.
//!
//! ## Algorithm
//!
//! 1. Ask the registry for available candidates, best first.
//! 2. Walk the candidates one at a time, never in parallel, until a provider
//!    answers or `max_retries` adapter calls have been made.
//! 3. Candidates blocked by category policy, at their minute/hour cap, missing
//!    credentials, or disabled since selection are skipped without using a slot.
//! 4. Every adapter call is bounded by the request timeout and recorded with
//!    the usage recorder, except a payload rejection, which ends the request
//!    without touching provider health.
//! 5. The first success is annotated with orchestration metadata and returned.
//!
//! Per-attempt failures never escape as `Err`; the caller always receives an
//! [`OrchestrationResult`].

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use relay_domain::constants::{CAPABILITY_AVATAR_GENERATION, ORCHESTRATION_METADATA_KEY};
use relay_domain::entities::{Provider, UsageWindow};
use relay_domain::error::{AttemptError, Error};
use relay_domain::ports::{CapabilityAdapter, PolicyStore};
use relay_domain::value_objects::{
    AttemptOutcome, AttemptRecord, CategoryPolicy, OrchestrationMetadata, OrchestrationRequest,
    OrchestrationResult, OrchestrationStatus, SkippedProvider, UsageReport,
};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::domain_services::{ProviderRegistry, UsageRecorder, is_available};
use crate::ports::registry::AdapterRegistry;

/// Engine tuning
#[derive(Debug, Clone)]
pub struct OrchestrationSettings {
    /// Capabilities served by a primary engine with a designated fallback
    pub primary_fallback_capabilities: Vec<String>,
}

impl Default for OrchestrationSettings {
    fn default() -> Self {
        Self {
            primary_fallback_capabilities: vec![CAPABILITY_AVATAR_GENERATION.to_string()],
        }
    }
}

#[derive(Default)]
struct Progress {
    tried: Vec<String>,
    attempts: Vec<AttemptRecord>,
    skipped: Vec<SkippedProvider>,
}

fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

/// Attach orchestration metadata to successful response data
///
/// Non-object data is wrapped as `{"result": data}` first.
fn annotate(data: Value, metadata: &OrchestrationMetadata) -> Value {
    let mut object = match data {
        Value::Object(map) => map,
        other => {
            let mut map = serde_json::Map::new();
            map.insert("result".to_string(), other);
            map
        }
    };
    object.insert(
        ORCHESTRATION_METADATA_KEY.to_string(),
        serde_json::to_value(metadata).unwrap_or_default(),
    );
    Value::Object(object)
}

/// Per-request failover over interchangeable providers
pub struct OrchestrationEngine {
    registry: ProviderRegistry,
    recorder: UsageRecorder,
    adapters: Arc<AdapterRegistry>,
    policy: Arc<dyn PolicyStore>,
    settings: OrchestrationSettings,
}

impl OrchestrationEngine {
    /// Create an engine
    pub fn new(
        registry: ProviderRegistry,
        recorder: UsageRecorder,
        adapters: Arc<AdapterRegistry>,
        policy: Arc<dyn PolicyStore>,
    ) -> Self {
        Self {
            registry,
            recorder,
            adapters,
            policy,
            settings: OrchestrationSettings::default(),
        }
    }

    /// Replace the engine settings
    #[must_use]
    pub fn with_settings(mut self, settings: OrchestrationSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Adapters the engine dispatches to
    pub fn adapters(&self) -> &Arc<AdapterRegistry> {
        &self.adapters
    }

    /// Serve one request
    #[instrument(
        skip(self, request),
        fields(request_id = %request.request_id, capability = %request.capability)
    )]
    pub async fn orchestrate(&self, request: OrchestrationRequest) -> OrchestrationResult {
        let started = Instant::now();

        if let Err(e) = request.validate() {
            warn!(error = %e, "Rejecting request");
            return Self::failed(&request, started, &e, Progress::default());
        }

        let Some(adapter) = self.adapters.get(&request.capability) else {
            warn!("No adapter registered for capability");
            let error = Error::unknown_capability(&request.capability);
            return Self::failed(&request, started, &error, Progress::default());
        };

        let candidates = match self
            .registry
            .list_available(&request.capability, request.prefer_free)
            .await
        {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!(error = %e, "Failed to list providers");
                return Self::failed(&request, started, &e, Progress::default());
            }
        };
        if candidates.is_empty() {
            info!("No available providers");
            let error = Error::no_providers(&request.capability);
            return Self::failed(&request, started, &error, Progress::default());
        }

        let policy = self.policy.get();
        let budget = request.max_retries;
        let mut progress = Progress::default();

        for candidate in candidates {
            if progress.attempts.len() >= budget {
                break;
            }

            let provider = match self.admit(adapter.as_ref(), candidate, &policy).await {
                Ok(provider) => provider,
                Err((name, reason)) => {
                    debug!(provider = %name, reason = %reason, "Skipping provider");
                    progress.skipped.push(SkippedProvider { name, reason });
                    continue;
                }
            };

            let attempt_index = progress.attempts.len() + 1;
            let attempt_started = Instant::now();
            let outcome = match tokio::time::timeout(
                request.timeout(),
                adapter.attempt(&provider, &request.payload, request.timeout()),
            )
            .await
            {
                Ok(outcome) => outcome,
                Err(_) => AttemptOutcome::failed(AttemptError::Timeout {
                    timeout_ms: request.timeout_ms,
                }),
            };
            let elapsed_ms = millis(attempt_started.elapsed());

            if outcome.success {
                self.record(&provider, UsageReport::success(elapsed_ms))
                    .await;
                progress.attempts.push(AttemptRecord {
                    provider: provider.name.clone(),
                    status: OrchestrationStatus::Success,
                    error: None,
                    elapsed_ms,
                });

                let metadata = OrchestrationMetadata {
                    provider_used: provider.name.clone(),
                    attempt_index,
                    failover_triggered: attempt_index > 1,
                    elapsed_ms,
                };
                info!(
                    provider = %provider.name,
                    attempt_index,
                    elapsed_ms,
                    "Request served"
                );
                return OrchestrationResult {
                    request_id: request.request_id,
                    status: OrchestrationStatus::Success,
                    response_data: Some(annotate(outcome.data.unwrap_or_default(), &metadata)),
                    provider_used: Some(provider.name),
                    total_attempts: progress.attempts.len(),
                    total_time_ms: millis(started.elapsed()),
                    error_message: None,
                    fallback_providers_tried: progress.tried,
                    attempts: progress.attempts,
                    skipped_providers: progress.skipped,
                };
            }

            let error = outcome.error.unwrap_or_else(|| {
                AttemptError::invalid_response("adapter reported failure without detail")
            });
            if error.is_caller_error() {
                info!(provider = %provider.name, error = %error, "Payload rejected, not retrying");
                let terminal = Error::invalid_argument(error.to_string());
                progress.attempts.push(AttemptRecord {
                    provider: provider.name,
                    status: OrchestrationStatus::Failed,
                    error: Some(error),
                    elapsed_ms,
                });
                return Self::failed(&request, started, &terminal, progress);
            }
            self.record(&provider, UsageReport::failure(error.to_string(), elapsed_ms))
                .await;

            if error.is_rate_limited() {
                info!(provider = %provider.name, "Provider rate limited, failing over");
            } else if self.is_primary(&request.capability, &provider) {
                info!(provider = %provider.name, error = %error, "Primary provider failed, switching to fallback");
            } else {
                debug!(provider = %provider.name, error = %error, "Attempt failed");
            }

            progress.attempts.push(AttemptRecord {
                provider: provider.name.clone(),
                status: OrchestrationStatus::of_failure(&error),
                error: Some(error),
                elapsed_ms,
            });
            progress.tried.push(provider.name);
        }

        let error = if progress.attempts.is_empty() {
            Error::no_providers(&request.capability)
        } else {
            Error::exhausted(&request.capability, progress.tried.clone())
        };
        warn!(attempts = progress.attempts.len(), error = %error, "Request failed");
        Self::failed(&request, started, &error, progress)
    }

    /// Re-read a candidate and decide whether it may be attempted now
    async fn admit(
        &self,
        adapter: &dyn CapabilityAdapter,
        candidate: Provider,
        policy: &CategoryPolicy,
    ) -> Result<Provider, (String, AttemptError)> {
        let provider = match self.registry.repository().get(&candidate.id).await {
            Ok(Some(fresh)) => fresh,
            Ok(None) => {
                return Err((
                    candidate.name,
                    AttemptError::Unavailable {
                        provider: candidate.id,
                    },
                ));
            }
            Err(e) => {
                warn!(provider = %candidate.name, error = %e, "Failed to refresh provider");
                candidate
            }
        };
        let now = Utc::now();

        if !adapter.is_eligible(&provider, policy) {
            let category = provider.category.clone().unwrap_or_default();
            return Err((provider.name, AttemptError::PolicyBlocked { category }));
        }
        if !is_available(&provider, now) {
            let id = provider.id.clone();
            return Err((provider.name, AttemptError::Unavailable { provider: id }));
        }
        for (window, label) in [(UsageWindow::Minute, "minute"), (UsageWindow::Hour, "hour")] {
            if let Some(limit) = provider.rate_limits.limit(window)
                && !provider.is_within_limit(window, now)
            {
                return Err((
                    provider.name,
                    AttemptError::WindowLimitReached {
                        window: label.to_string(),
                        limit,
                    },
                ));
            }
        }
        if provider.requires_key && !adapter.has_credentials(&provider.id) {
            let id = provider.id.clone();
            return Err((provider.name, AttemptError::MissingCredentials { provider: id }));
        }
        Ok(provider)
    }

    async fn record(&self, provider: &Provider, report: UsageReport) {
        if let Err(e) = self.recorder.record(&provider.id, report).await {
            warn!(provider = %provider.name, error = %e, "Failed to record usage");
        }
    }

    fn is_primary(&self, capability: &str, provider: &Provider) -> bool {
        provider.priority == 1
            && self
                .settings
                .primary_fallback_capabilities
                .iter()
                .any(|c| c == capability)
    }

    fn failed(
        request: &OrchestrationRequest,
        started: Instant,
        error: &Error,
        progress: Progress,
    ) -> OrchestrationResult {
        OrchestrationResult {
            request_id: request.request_id,
            status: OrchestrationStatus::Failed,
            response_data: None,
            provider_used: None,
            total_attempts: progress.attempts.len(),
            total_time_ms: millis(started.elapsed()),
            error_message: Some(error.to_string()),
            fallback_providers_tried: progress.tried,
            attempts: progress.attempts,
            skipped_providers: progress.skipped,
        }
    }
}
