//! Rotation outcome

use serde::{Deserialize, Serialize};

/// Lightweight provider reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderRef {
    /// Provider id
    pub id: String,
    /// Provider name
    pub name: String,
}

/// Previous and new default of a capability after rotation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationOutcome {
    /// Rotated capability
    pub capability: String,
    /// Default before rotation
    pub previous: ProviderRef,
    /// Default after rotation
    pub current: ProviderRef,
}
