//! Provider entity
//!
//! One [`Provider`] exists per (capability, vendor) pair. Its policy fields are
//! set by registration and administrative action; its usage and health fields
//! are only mutated by the usage recorder as a side effect of attempts.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, DurationRound, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Health classification of a provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    /// Recent attempts mostly succeed
    Healthy,
    /// Recent errors crossed the degraded threshold
    Degraded,
    /// Excluded from selection until an operator changes it
    Unhealthy,
    /// No attempt recorded since registration or re-enable
    #[default]
    Unknown,
}

impl HealthStatus {
    /// Lowercase wire name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Degraded => "degraded",
            Self::Unhealthy => "unhealthy",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HealthStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "healthy" => Ok(Self::Healthy),
            "degraded" => Ok(Self::Degraded),
            "unhealthy" => Ok(Self::Unhealthy),
            "unknown" => Ok(Self::Unknown),
            other => Err(Error::invalid_argument(format!(
                "unknown health status '{other}'"
            ))),
        }
    }
}

/// How a provider authenticates outbound calls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthenticationType {
    /// No credentials sent
    #[default]
    None,
    /// Key passed in a header or query parameter
    ApiKey,
    /// `Authorization: Bearer <token>`
    BearerToken,
    /// `Authorization: Basic <base64(user:pass)>`
    BasicAuth,
}

/// Rate-limit window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageWindow {
    /// Calendar minute (UTC)
    Minute,
    /// Calendar hour (UTC)
    Hour,
    /// Calendar day (UTC)
    Day,
}

impl UsageWindow {
    fn span(self) -> TimeDelta {
        match self {
            Self::Minute => TimeDelta::minutes(1),
            Self::Hour => TimeDelta::hours(1),
            Self::Day => TimeDelta::days(1),
        }
    }

    /// Start of the window containing `t`
    pub fn start_of(self, t: DateTime<Utc>) -> DateTime<Utc> {
        t.duration_trunc(self.span()).unwrap_or(t)
    }
}

/// Per-window request caps; `None` means unlimited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RateLimits {
    /// Requests allowed per minute
    #[serde(default)]
    pub per_minute: Option<u64>,
    /// Requests allowed per hour
    #[serde(default)]
    pub per_hour: Option<u64>,
    /// Requests allowed per day
    #[serde(default)]
    pub per_day: Option<u64>,
}

impl RateLimits {
    /// Limit for one window
    pub fn limit(&self, window: UsageWindow) -> Option<u64> {
        match window {
            UsageWindow::Minute => self.per_minute,
            UsageWindow::Hour => self.per_hour,
            UsageWindow::Day => self.per_day,
        }
    }
}

/// Counter for one window plus the start of the window it belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WindowUsage {
    /// Attempts counted in the window starting at `last_reset`
    pub count: u64,
    /// Start of the window the count belongs to
    pub last_reset: Option<DateTime<Utc>>,
}

impl WindowUsage {
    fn is_stale(&self, window: UsageWindow, now: DateTime<Utc>) -> bool {
        self.last_reset
            .is_some_and(|reset| window.start_of(reset) != window.start_of(now))
    }

    /// Count as seen at `now`; a rolled-over window reads as zero
    pub fn current(&self, window: UsageWindow, now: DateTime<Utc>) -> u64 {
        if self.is_stale(window, now) {
            0
        } else {
            self.count
        }
    }

    /// Zero the counter when `now` lies in a later window
    pub fn roll_over(&mut self, window: UsageWindow, now: DateTime<Utc>) {
        if self.is_stale(window, now) {
            self.count = 0;
        }
        self.last_reset = Some(window.start_of(now));
    }
}

/// Minute, hour and day counters of a provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UsageCounters {
    /// Current minute
    #[serde(default)]
    pub minute: WindowUsage,
    /// Current hour
    #[serde(default)]
    pub hour: WindowUsage,
    /// Current day
    #[serde(default)]
    pub day: WindowUsage,
}

impl UsageCounters {
    fn window(&self, window: UsageWindow) -> &WindowUsage {
        match window {
            UsageWindow::Minute => &self.minute,
            UsageWindow::Hour => &self.hour,
            UsageWindow::Day => &self.day,
        }
    }

    /// Usage in `window` as seen at `now`
    pub fn current(&self, window: UsageWindow, now: DateTime<Utc>) -> u64 {
        self.window(window).current(window, now)
    }

    /// Roll every window over to the one containing `now`
    pub fn roll_over(&mut self, now: DateTime<Utc>) {
        self.minute.roll_over(UsageWindow::Minute, now);
        self.hour.roll_over(UsageWindow::Hour, now);
        self.day.roll_over(UsageWindow::Day, now);
    }

    /// Count one attempt at `now` in every window
    pub fn increment(&mut self, now: DateTime<Utc>) {
        self.roll_over(now);
        self.minute.count += 1;
        self.hour.count += 1;
        self.day.count += 1;
    }
}

/// Health and outcome statistics of a provider
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProviderHealth {
    /// Current classification
    pub status: HealthStatus,
    /// When the status was last evaluated
    pub last_health_check: Option<DateTime<Utc>>,
    /// Failures not yet offset by successes
    pub recent_errors: u32,
    /// Percentage of successful attempts
    pub success_rate: f64,
    /// Two-point moving average of response time in milliseconds
    pub average_response_time: Option<f64>,
    /// Attempts recorded
    pub total_requests: u64,
    /// Failed attempts recorded
    pub total_errors: u64,
    /// Time of the last successful attempt
    pub last_success: Option<DateTime<Utc>>,
    /// Time of the last failed attempt
    pub last_error: Option<DateTime<Utc>>,
    /// Truncated message of the last failure
    pub error_message: Option<String>,
}

/// A configured third-party vendor offering one capability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    /// Stable identifier, also the credential lookup key
    pub id: String,
    /// Display name, used in results and logs
    pub name: String,
    /// Capability this provider serves
    pub capability: String,
    /// Policy category gating this provider, if any
    #[serde(default)]
    pub category: Option<String>,
    /// Lower is tried first
    pub priority: u32,
    /// Order among fallbacks when several share a priority
    pub failover_priority: u32,
    /// Disabled providers are never selected
    pub enabled: bool,
    /// Whether repeated failures may disable this provider
    pub auto_disable: bool,
    /// Whether a credential must be stored before attempting
    pub requires_key: bool,
    /// Request caps
    #[serde(default)]
    pub rate_limits: RateLimits,
    /// Window counters
    #[serde(default)]
    pub usage: UsageCounters,
    /// Health statistics
    #[serde(default)]
    pub health: ProviderHealth,
    /// Outbound authentication scheme
    #[serde(default)]
    pub authentication_type: AuthenticationType,
    /// Vendor-specific settings interpreted by the capability adapter
    #[serde(default)]
    pub configuration: serde_json::Value,
}

impl Provider {
    /// Create an enabled provider with priority 1 and no limits
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        capability: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            capability: capability.into(),
            category: None,
            priority: 1,
            failover_priority: 1,
            enabled: true,
            auto_disable: true,
            requires_key: false,
            rate_limits: RateLimits::default(),
            usage: UsageCounters::default(),
            health: ProviderHealth::default(),
            authentication_type: AuthenticationType::None,
            configuration: serde_json::Value::Null,
        }
    }

    /// Set priority and failover priority
    #[must_use]
    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = priority;
        self.failover_priority = priority;
        self
    }

    /// Set the daily cap
    #[must_use]
    pub fn with_day_limit(mut self, per_day: u64) -> Self {
        self.rate_limits.per_day = Some(per_day);
        self
    }

    /// Replace all caps
    #[must_use]
    pub fn with_rate_limits(mut self, rate_limits: RateLimits) -> Self {
        self.rate_limits = rate_limits;
        self
    }

    /// Require a stored credential
    #[must_use]
    pub fn with_requires_key(mut self, requires_key: bool) -> Self {
        self.requires_key = requires_key;
        self
    }

    /// Allow or forbid circuit-breaker auto-disable
    #[must_use]
    pub fn with_auto_disable(mut self, auto_disable: bool) -> Self {
        self.auto_disable = auto_disable;
        self
    }

    /// Gate the provider behind a policy category
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the vendor configuration blob
    #[must_use]
    pub fn with_configuration(mut self, configuration: serde_json::Value) -> Self {
        self.configuration = configuration;
        self
    }

    /// Set the outbound authentication scheme
    #[must_use]
    pub fn with_authentication(mut self, authentication_type: AuthenticationType) -> Self {
        self.authentication_type = authentication_type;
        self.requires_key = authentication_type != AuthenticationType::None;
        self
    }

    /// Whether a daily cap is configured
    pub fn has_day_limit(&self) -> bool {
        self.rate_limits.per_day.is_some()
    }

    /// Usage in `window` as seen at `now`
    pub fn usage_in(&self, window: UsageWindow, now: DateTime<Utc>) -> u64 {
        self.usage.current(window, now)
    }

    /// Whether usage in `window` is still below its cap (always true when uncapped)
    pub fn is_within_limit(&self, window: UsageWindow, now: DateTime<Utc>) -> bool {
        self.rate_limits
            .limit(window)
            .is_none_or(|limit| self.usage_in(window, now) < limit)
    }

    /// Fraction of the daily cap consumed; `0.0` when uncapped
    #[allow(clippy::cast_precision_loss)]
    pub fn load_factor(&self, now: DateTime<Utc>) -> f64 {
        match self.rate_limits.per_day {
            Some(0) => 1.0,
            Some(limit) => self.usage_in(UsageWindow::Day, now) as f64 / limit as f64,
            None => 0.0,
        }
    }
}
