//! Category policy and circuit-breaker thresholds

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::{
    AUTO_DISABLE_ERROR_THRESHOLD, DEGRADED_ERROR_THRESHOLD, ERROR_MESSAGE_MAX_LEN,
};

/// Boolean switch per restricted category
///
/// Categories not present are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CategoryPolicy {
    /// Category name to allowed flag
    #[serde(default)]
    pub categories: BTreeMap<String, bool>,
}

impl CategoryPolicy {
    /// Whether providers in `category` may be considered
    pub fn is_allowed(&self, category: &str) -> bool {
        self.categories.get(category).copied().unwrap_or(true)
    }

    /// Allow or block a category
    pub fn set(&mut self, category: impl Into<String>, allowed: bool) {
        self.categories.insert(category.into(), allowed);
    }
}

/// Thresholds applied by the usage recorder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitBreakerPolicy {
    /// Recent errors at which `auto_disable` providers are disabled
    pub auto_disable_threshold: u32,
    /// Recent errors at which health is reported as degraded
    pub degraded_threshold: u32,
    /// Maximum stored error message length in characters
    pub error_message_max_len: usize,
}

impl Default for CircuitBreakerPolicy {
    fn default() -> Self {
        Self {
            auto_disable_threshold: AUTO_DISABLE_ERROR_THRESHOLD,
            degraded_threshold: DEGRADED_ERROR_THRESHOLD,
            error_message_max_len: ERROR_MESSAGE_MAX_LEN,
        }
    }
}
