//! Request and response models for the HTTP API

use relay_domain::entities::HealthStatus;
use relay_domain::error::{Error, Result};
use relay_domain::value_objects::{OrchestrationRequest, Payload};
use relay_infrastructure::AppContext;
use serde::{Deserialize, Serialize};

/// Body of `POST /orchestrate`
///
/// Omitted knobs take the configured defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestrateBody {
    /// Requested capability
    pub capability: String,
    /// Capability-specific input
    #[serde(default)]
    pub payload: Payload,
    /// Per-attempt timeout in milliseconds
    #[serde(default)]
    pub timeout_ms: Option<u64>,
    /// Maximum number of providers attempted
    #[serde(default)]
    pub max_retries: Option<usize>,
    /// Put providers without a daily cap first
    #[serde(default)]
    pub prefer_free: Option<bool>,
}

impl OrchestrateBody {
    /// Build the engine request, filling gaps from configuration
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when the capability is blank or a knob is zero.
    pub fn into_request(self, app: &AppContext) -> Result<OrchestrationRequest> {
        if self.capability.trim().is_empty() {
            return Err(Error::invalid_argument("capability must not be empty"));
        }
        let mut request = app.request(self.capability, self.payload);
        if let Some(timeout_ms) = self.timeout_ms {
            request.timeout_ms = timeout_ms;
        }
        if let Some(max_retries) = self.max_retries {
            request.max_retries = max_retries;
        }
        if let Some(prefer_free) = self.prefer_free {
            request.prefer_free = prefer_free;
        }
        request.validate()?;
        Ok(request)
    }
}

/// Body of `PUT /providers/<id>/health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthOverride {
    /// New health classification
    pub status: HealthStatus,
}

/// Body of `PUT /providers/<id>/credentials`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialBody {
    /// Secret name, `api_key` when omitted
    #[serde(default = "default_credential_name")]
    pub name: String,
    /// Secret value
    pub value: String,
}

fn default_credential_name() -> String {
    "api_key".to_string()
}

/// Body of `PUT /policy/<category>`
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CategoryBody {
    /// Whether providers in the category may be selected
    pub allowed: bool,
}

/// `GET /health` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `ok` when the server answers
    pub status: String,
    /// Server version
    pub version: String,
    /// Capabilities with a registered adapter
    pub capabilities: Vec<String>,
    /// Registered providers across all capabilities
    pub providers: usize,
    /// Providers selection would currently consider
    pub available_providers: usize,
}

/// `GET /live` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LivenessResponse {
    /// Always `alive`
    pub status: String,
}

/// Generic acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionResponse {
    /// Whether the action succeeded
    pub success: bool,
    /// Action result message
    pub message: String,
}

impl ActionResponse {
    /// Create a success response
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}
