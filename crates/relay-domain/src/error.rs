//! Error handling types
//!
//! Two families of failures exist in the orchestrator:
//!
//! | Type | Scope | Surfaced to caller |
//! |------|-------|--------------------|
//! | [`Error`] | Admin operations, configuration, infrastructure, terminal orchestration outcomes | Yes, as `Result` |
//! | [`AttemptError`] | One adapter call against one provider | Never directly; recorded and folded into the result |

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the relay
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (with context)
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// JSON parsing or serialization error
    #[error("JSON parsing error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// Resource not found error
    #[error("Not found: {resource}")]
    NotFound {
        /// The resource that was not found
        resource: String,
    },

    /// Invalid argument provided to a function
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument
        message: String,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Network-related error
    #[error("Network error: {message}")]
    Network {
        /// Description of the network error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },

    /// Infrastructure operation error
    #[error("Infrastructure error: {message}")]
    Infrastructure {
        /// Description of the infrastructure error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// No registered, enabled and eligible provider for a capability
    #[error("no available providers for capability {capability}")]
    NoProvidersAvailable {
        /// Requested capability
        capability: String,
    },

    /// Rotation needs at least two enabled providers
    #[error("no alternative providers available")]
    NoAlternativeProviders {
        /// Capability that could not be rotated
        capability: String,
    },

    /// Every attempted provider failed
    #[error("all {} providers failed for capability {capability}", tried.len())]
    AllProvidersExhausted {
        /// Requested capability
        capability: String,
        /// Provider names in the order they were attempted
        tried: Vec<String>,
    },

    /// No adapter is registered for the capability
    #[error("no adapter registered for capability {capability}")]
    UnknownCapability {
        /// Requested capability
        capability: String,
    },
}

// Basic error creation methods
impl Error {
    /// Create a not found error
    pub fn not_found<S: Into<String>>(resource: S) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

// I/O error creation methods
impl Error {
    /// Create an I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io {
            message: message.into(),
            source: None,
        }
    }

    /// Create an I/O error with source
    pub fn io_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Configuration error creation methods
impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Network and infrastructure error creation methods
impl Error {
    /// Create a network error with source
    pub fn network_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Network {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an infrastructure error
    pub fn infrastructure<S: Into<String>>(message: S) -> Self {
        Self::Infrastructure {
            message: message.into(),
            source: None,
        }
    }

    /// Create an infrastructure error with source
    pub fn infrastructure_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Infrastructure {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Orchestration outcome creation methods
impl Error {
    /// Create a no-providers-available error
    pub fn no_providers<S: Into<String>>(capability: S) -> Self {
        Self::NoProvidersAvailable {
            capability: capability.into(),
        }
    }

    /// Create a no-alternative-providers error
    pub fn no_alternatives<S: Into<String>>(capability: S) -> Self {
        Self::NoAlternativeProviders {
            capability: capability.into(),
        }
    }

    /// Create an exhausted-providers error
    pub fn exhausted<S: Into<String>>(capability: S, tried: Vec<String>) -> Self {
        Self::AllProvidersExhausted {
            capability: capability.into(),
            tried,
        }
    }

    /// Create an unknown-capability error
    pub fn unknown_capability<S: Into<String>>(capability: S) -> Self {
        Self::UnknownCapability {
            capability: capability.into(),
        }
    }
}

/// Failure of a single adapter attempt against one provider
///
/// These never escape the orchestration loop as `Err`; they are recorded on
/// the provider and reported inside the attempt list of the result.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AttemptError {
    /// Vendor signalled quota exhaustion (HTTP 429 or equivalent)
    #[error("rate limited: {message}")]
    RateLimited {
        /// Vendor-provided detail
        message: String,
    },

    /// The attempt exceeded the request timeout
    #[error("timed out after {timeout_ms}ms")]
    Timeout {
        /// Timeout that was exceeded
        timeout_ms: u64,
    },

    /// Provider requires a key and none is stored
    #[error("missing credentials for provider {provider}")]
    MissingCredentials {
        /// Provider id
        provider: String,
    },

    /// Vendor answered with a non-success HTTP status
    #[error("vendor HTTP {status}: {body_excerpt}")]
    VendorHttp {
        /// HTTP status code
        status: u16,
        /// Truncated response body
        body_excerpt: String,
    },

    /// Provider configuration blob is malformed or incomplete
    #[error("configuration error: {message}")]
    Configuration {
        /// Description of the problem
        message: String,
    },

    /// Transport-level failure
    #[error("network error: {message}")]
    Network {
        /// Description of the failure
        message: String,
    },

    /// Vendor answered 2xx but the body could not be understood
    #[error("invalid response: {message}")]
    InvalidResponse {
        /// Description of the problem
        message: String,
    },

    /// Request payload is missing a field this capability needs
    #[error("invalid payload: {message}")]
    InvalidPayload {
        /// Description of the problem
        message: String,
    },

    /// Provider became unavailable after candidates were selected
    #[error("provider {provider} is no longer available")]
    Unavailable {
        /// Provider id
        provider: String,
    },

    /// Minute or hour cap reached for the current window
    #[error("{window} limit of {limit} reached")]
    WindowLimitReached {
        /// `minute` or `hour`
        window: String,
        /// Configured cap
        limit: u64,
    },

    /// Provider category is blocked by the category policy
    #[error("category {category} is disabled by policy")]
    PolicyBlocked {
        /// Blocked category
        category: String,
    },
}

impl AttemptError {
    /// Whether this failure indicates vendor rate limiting
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }

    /// Whether this failure is a timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Whether the request, not the provider, caused this failure
    ///
    /// Such failures end the request and are never counted against the
    /// provider's health.
    pub fn is_caller_error(&self) -> bool {
        matches!(self, Self::InvalidPayload { .. })
    }

    /// Create a configuration attempt error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a network attempt error
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create an invalid response attempt error
    pub fn invalid_response<S: Into<String>>(message: S) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }

    /// Create an invalid payload attempt error
    pub fn invalid_payload<S: Into<String>>(message: S) -> Self {
        Self::InvalidPayload {
            message: message.into(),
        }
    }
}
