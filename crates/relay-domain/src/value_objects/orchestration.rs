//! Orchestration request and result value objects

use std::time::Duration;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_MS};
use crate::error::{AttemptError, Error};

/// Opaque request payload handed to the capability adapter
pub type Payload = serde_json::Map<String, serde_json::Value>;

/// One call to the orchestrator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrchestrationRequest {
    /// Correlation id, echoed in the result
    pub request_id: Uuid,
    /// Requested capability
    pub capability: String,
    /// Capability-specific input
    #[serde(default)]
    pub payload: Payload,
    /// Per-attempt timeout in milliseconds
    pub timeout_ms: u64,
    /// Maximum number of providers attempted
    pub max_retries: usize,
    /// Put providers without a daily cap first
    #[serde(default)]
    pub prefer_free: bool,
}

impl OrchestrationRequest {
    /// Create a request with default timeout and retry budget
    pub fn new(capability: impl Into<String>, payload: Payload) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            capability: capability.into(),
            payload,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            max_retries: DEFAULT_MAX_RETRIES,
            prefer_free: false,
        }
    }

    /// Set the per-attempt timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Set the attempt budget
    #[must_use]
    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Prefer providers without a daily cap
    #[must_use]
    pub fn prefer_free(mut self, prefer_free: bool) -> Self {
        self.prefer_free = prefer_free;
        self
    }

    /// Per-attempt timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Reject knobs that would make every attempt fail or none happen
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when `timeout_ms` or `max_retries` is zero.
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.timeout_ms == 0 {
            return Err(Error::invalid_argument("timeout_ms must be greater than 0"));
        }
        if self.max_retries == 0 {
            return Err(Error::invalid_argument("max_retries must be greater than 0"));
        }
        Ok(())
    }
}

/// Terminal or per-attempt outcome classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrchestrationStatus {
    /// A provider answered successfully
    Success,
    /// No provider answered successfully
    Failed,
    /// The attempt exceeded its timeout
    Timeout,
    /// The vendor rejected the call for quota reasons
    RateLimited,
}

impl OrchestrationStatus {
    /// Classify a failed attempt
    pub fn of_failure(error: &AttemptError) -> Self {
        match error {
            AttemptError::Timeout { .. } => Self::Timeout,
            AttemptError::RateLimited { .. } => Self::RateLimited,
            _ => Self::Failed,
        }
    }
}

/// Record of one adapter call made while serving a request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptRecord {
    /// Provider name
    pub provider: String,
    /// Outcome of this attempt
    pub status: OrchestrationStatus,
    /// Failure detail when the attempt failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<AttemptError>,
    /// Wall time of the attempt
    pub elapsed_ms: u64,
}

/// Candidate that was passed over without an adapter call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedProvider {
    /// Provider name
    pub name: String,
    /// Why it was skipped
    pub reason: AttemptError,
}

/// Outcome of one orchestration call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrchestrationResult {
    /// Echo of the request id
    pub request_id: Uuid,
    /// `success` or `failed`
    pub status: OrchestrationStatus,
    /// Normalized response data, annotated with orchestration metadata
    pub response_data: Option<serde_json::Value>,
    /// Name of the provider that answered
    pub provider_used: Option<String>,
    /// Number of adapter calls made
    pub total_attempts: usize,
    /// Wall time of the whole call
    pub total_time_ms: u64,
    /// Terminal error message when failed
    pub error_message: Option<String>,
    /// Names of providers that failed, in attempt order
    pub fallback_providers_tried: Vec<String>,
    /// Every adapter call made
    #[serde(default)]
    pub attempts: Vec<AttemptRecord>,
    /// Candidates skipped without a call
    #[serde(default)]
    pub skipped_providers: Vec<SkippedProvider>,
}

impl OrchestrationResult {
    /// Whether a provider answered
    pub fn is_success(&self) -> bool {
        self.status == OrchestrationStatus::Success
    }

    /// Whether the request itself was rejected by the adapter
    pub fn is_caller_error(&self) -> bool {
        self.attempts
            .last()
            .and_then(|attempt| attempt.error.as_ref())
            .is_some_and(AttemptError::is_caller_error)
    }
}

/// Metadata attached to successful response data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrchestrationMetadata {
    /// Name of the provider that answered
    pub provider_used: String,
    /// 1-based index of the successful attempt
    pub attempt_index: usize,
    /// Whether an earlier attempt failed
    pub failover_triggered: bool,
    /// Wall time of the successful attempt
    pub elapsed_ms: u64,
}

/// Normalized outcome of one adapter call
#[derive(Debug, Clone, PartialEq)]
pub struct AttemptOutcome {
    /// Whether the vendor answered successfully
    pub success: bool,
    /// Normalized response on success
    pub data: Option<serde_json::Value>,
    /// Failure detail otherwise
    pub error: Option<AttemptError>,
}

impl AttemptOutcome {
    /// Successful outcome carrying `data`
    pub fn succeeded(data: serde_json::Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Failed outcome carrying `error`
    pub fn failed(error: AttemptError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
        }
    }
}

impl From<Result<serde_json::Value, AttemptError>> for AttemptOutcome {
    fn from(result: Result<serde_json::Value, AttemptError>) -> Self {
        match result {
            Ok(data) => Self::succeeded(data),
            Err(error) => Self::failed(error),
        }
    }
}
