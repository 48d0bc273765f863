//! Usage recording and circuit breaking
//!
//! Every attempt, successful or not, is folded into the provider record by
//! [`apply_usage`]. The repository runs the mutation under the provider's
//! lock, so concurrent reports never drop an increment and the
//! `enabled: true -> false` transition happens exactly once.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use relay_domain::entities::Provider;
use relay_domain::error::Result;
use relay_domain::ports::ProviderRepository;
use relay_domain::utils::truncate_chars;
use relay_domain::value_objects::{CircuitBreakerPolicy, UsageEffect, UsageReport};
use tracing::{debug, warn};

use super::health::health_from_errors;

/// Apply one attempt outcome to `provider`
///
/// Returns `true` when this call tripped the circuit breaker.
#[allow(clippy::cast_precision_loss)]
pub fn apply_usage(
    provider: &mut Provider,
    report: &UsageReport,
    now: DateTime<Utc>,
    policy: &CircuitBreakerPolicy,
) -> bool {
    provider.usage.increment(now);

    let health = &mut provider.health;
    health.total_requests += 1;

    if report.success {
        health.recent_errors = health.recent_errors.saturating_sub(1);
        health.last_success = Some(now);
        let elapsed = report.elapsed_ms as f64;
        health.average_response_time = Some(match health.average_response_time {
            Some(avg) => (avg + elapsed) / 2.0,
            None => elapsed,
        });
    } else {
        health.total_errors += 1;
        health.recent_errors = health.recent_errors.saturating_add(1);
        health.last_error = Some(now);
        let message = report.error.as_deref().unwrap_or("unknown error");
        health.error_message = Some(truncate_chars(message, policy.error_message_max_len));
    }

    health.success_rate = if health.total_requests == 0 {
        0.0
    } else {
        (health.total_requests - health.total_errors) as f64 / health.total_requests as f64
            * 100.0
    };
    health.status = health_from_errors(
        health.status,
        health.recent_errors,
        policy.degraded_threshold,
    );
    health.last_health_check = Some(now);

    let trip = provider.auto_disable
        && provider.enabled
        && provider.health.recent_errors >= policy.auto_disable_threshold;
    if trip {
        provider.enabled = false;
    }
    trip
}

/// Feeds attempt outcomes into the repository
#[derive(Clone)]
pub struct UsageRecorder {
    repository: Arc<dyn ProviderRepository>,
    policy: CircuitBreakerPolicy,
}

impl UsageRecorder {
    /// Create a recorder
    pub fn new(repository: Arc<dyn ProviderRepository>, policy: CircuitBreakerPolicy) -> Self {
        Self { repository, policy }
    }

    /// Thresholds in use
    pub fn policy(&self) -> &CircuitBreakerPolicy {
        &self.policy
    }

    /// Record one attempt outcome for provider `id`
    pub async fn record(&self, id: &str, report: UsageReport) -> Result<UsageEffect> {
        let policy = self.policy;
        let now = Utc::now();
        let logged = report.clone();
        let update = self
            .repository
            .update(
                id,
                Box::new(move |provider: &mut Provider| {
                    apply_usage(provider, &report, now, &policy);
                }),
            )
            .await?;

        let circuit_tripped = update.before.enabled && !update.after.enabled;
        let health = &update.after.health;
        if circuit_tripped {
            warn!(
                provider = %update.after.name,
                recent_errors = health.recent_errors,
                last_error = ?health.error_message,
                "Circuit breaker tripped, provider disabled"
            );
        } else {
            debug!(
                provider = %update.after.name,
                success = logged.success,
                elapsed_ms = logged.elapsed_ms,
                recent_errors = health.recent_errors,
                "Usage recorded"
            );
        }

        Ok(UsageEffect {
            circuit_tripped,
            recent_errors: health.recent_errors,
            enabled: update.after.enabled,
        })
    }
}
