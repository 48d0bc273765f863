//! JSON Value Extension
//!
//! Accessors over vendor responses and request payloads with default
//! fallbacks, plus payload validation that yields [`AttemptError`]s.

use relay_domain::error::AttemptError;
use relay_domain::value_objects::Payload;
use serde_json::Value;

/// Extension trait for JSON containers
pub trait JsonExt {
    /// Raw value at `key`
    fn value_at(&self, key: &str) -> Option<&Value>;

    /// Get string value or default
    fn str_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.opt_str(key).unwrap_or(default)
    }

    /// Get optional non-empty string
    fn opt_str(&self, key: &str) -> Option<&str> {
        self.value_at(key)
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
    }

    /// Get u64 value or default
    fn u64_or(&self, key: &str, default: u64) -> u64 {
        self.value_at(key).and_then(Value::as_u64).unwrap_or(default)
    }

    /// Get optional f64
    fn opt_f64(&self, key: &str) -> Option<f64> {
        self.value_at(key).and_then(Value::as_f64)
    }

    /// Get a required non-empty string
    fn required_str(&self, key: &str) -> Result<&str, AttemptError> {
        self.opt_str(key)
            .ok_or_else(|| AttemptError::invalid_payload(format!("'{key}' is required")))
    }

    /// Get an array, empty when absent
    fn array_at(&self, key: &str) -> &[Value] {
        self.value_at(key)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

impl JsonExt for Value {
    #[inline]
    fn value_at(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }
}

impl JsonExt for Payload {
    #[inline]
    fn value_at(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }
}
