//! Operator-facing provider status

use std::fmt;

use serde::{Deserialize, Serialize};

/// Status shown in administrative listings
///
/// Derived on every read from the provider record and credential presence;
/// never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderStatus {
    /// `enabled` is false
    Disabled,
    /// A key is required and none is stored
    MissingCredentials,
    /// Recent errors reached the auto-disable threshold
    DegradedByErrors,
    /// None of the above
    Healthy,
}

impl fmt::Display for ProviderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Disabled => "disabled",
            Self::MissingCredentials => "missing_credentials",
            Self::DegradedByErrors => "degraded_by_errors",
            Self::Healthy => "healthy",
        })
    }
}
