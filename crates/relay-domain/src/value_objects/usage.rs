//! Usage reporting value objects

use serde::{Deserialize, Serialize};

/// Outcome of one attempt as fed to the circuit breaker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageReport {
    /// Whether the attempt succeeded
    pub success: bool,
    /// Failure message
    #[serde(default)]
    pub error: Option<String>,
    /// Wall time of the attempt
    #[serde(default)]
    pub elapsed_ms: u64,
}

impl UsageReport {
    /// Successful attempt
    pub fn success(elapsed_ms: u64) -> Self {
        Self {
            success: true,
            error: None,
            elapsed_ms,
        }
    }

    /// Failed attempt
    pub fn failure(error: impl Into<String>, elapsed_ms: u64) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            elapsed_ms,
        }
    }
}

/// What recording a usage report changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageEffect {
    /// The report disabled the provider
    pub circuit_tripped: bool,
    /// Recent error count after the report
    pub recent_errors: u32,
    /// Enabled flag after the report
    pub enabled: bool,
}
