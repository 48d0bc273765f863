//! Admin API Authentication
//!
//! Administrative routes require a shared key in the `X-Admin-Key` header
//! (header name configurable).
//!
//! # Configuration
//!
//! - Config file: `admin.enabled = true` and `admin.key = "your-key"`
//! - Environment variable: `RELAY__ADMIN__KEY=your-key`
//!
//! # Unauthenticated Routes
//!
//! `/live`, `/health` and `/orchestrate` carry no guard.

use std::sync::Arc;

use relay_infrastructure::config::AdminConfig;
use rocket::http::Status;
use rocket::outcome::Outcome;
use rocket::request::{self, FromRequest, Request};
use serde::Serialize;

/// Admin authentication settings held in Rocket state
#[derive(Debug, Clone)]
pub struct AdminAuthConfig {
    /// Whether authentication is enforced
    pub enabled: bool,
    /// Header carrying the key
    pub header_name: String,
    /// Expected key
    pub api_key: Option<String>,
}

impl AdminAuthConfig {
    /// Create a new admin auth config
    pub fn new(enabled: bool, header_name: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            enabled,
            header_name: header_name.into(),
            api_key,
        }
    }

    /// Create from the admin section of the application config
    pub fn from_admin_config(config: &AdminConfig) -> Self {
        Self {
            enabled: config.enabled,
            header_name: config.header.clone(),
            api_key: config.key.clone(),
        }
    }

    /// Check a presented key; with no key configured nothing matches
    pub fn validate_key(&self, provided_key: &str) -> bool {
        self.api_key
            .as_deref()
            .is_some_and(|expected| expected == provided_key)
    }

    /// Whether a key exists to check against
    pub fn is_configured(&self) -> bool {
        self.enabled && self.api_key.is_some()
    }
}

impl Default for AdminAuthConfig {
    fn default() -> Self {
        Self::from_admin_config(&AdminConfig::default())
    }
}

/// Authentication error body
#[derive(Debug, Serialize)]
pub struct AuthErrorResponse {
    /// Error type
    pub error: &'static str,
    /// Error message
    pub message: String,
}

/// Why a request failed the admin guard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminAuthError {
    /// Authentication enabled without a key
    NotConfigured,
    /// Key presented but wrong
    InvalidKey,
    /// No key presented; carries the expected header name
    MissingKey(String),
}

impl AdminAuthError {
    /// Body sent back by the error catchers
    pub fn response(&self) -> AuthErrorResponse {
        match self {
            Self::NotConfigured => AuthErrorResponse {
                error: "auth_not_configured",
                message: "Admin authentication is enabled but no key is configured. \
                          Set RELAY__ADMIN__KEY or admin.key in the config file."
                    .to_string(),
            },
            Self::InvalidKey => AuthErrorResponse {
                error: "invalid_api_key",
                message: "Invalid admin API key".to_string(),
            },
            Self::MissingKey(header) => AuthErrorResponse {
                error: "missing_api_key",
                message: format!("Admin API key required. Provide it in the '{header}' header."),
            },
        }
    }
}

/// Request guard for admin routes
///
/// ```rust,ignore
/// #[get("/providers")]
/// async fn list(_auth: AdminAuth) -> ... { ... }
/// ```
pub struct AdminAuth;

#[rocket::async_trait]
impl<'r> FromRequest<'r> for AdminAuth {
    type Error = AdminAuthError;

    async fn from_request(request: &'r Request<'_>) -> request::Outcome<Self, Self::Error> {
        let Some(auth_config) = request.rocket().state::<Arc<AdminAuthConfig>>() else {
            return Outcome::Success(AdminAuth);
        };

        if !auth_config.enabled {
            return Outcome::Success(AdminAuth);
        }

        let outcome = if !auth_config.is_configured() {
            Err((Status::ServiceUnavailable, AdminAuthError::NotConfigured))
        } else {
            match request.headers().get_one(&auth_config.header_name) {
                Some(key) if auth_config.validate_key(key) => Ok(AdminAuth),
                Some(_) => Err((Status::Unauthorized, AdminAuthError::InvalidKey)),
                None => Err((
                    Status::Unauthorized,
                    AdminAuthError::MissingKey(auth_config.header_name.clone()),
                )),
            }
        };

        match outcome {
            Ok(auth) => Outcome::Success(auth),
            Err((status, error)) => {
                tracing::warn!(path = %request.uri(), ?error, "Admin request rejected");
                request.local_cache(|| Some(error.clone()));
                Outcome::Error((status, error))
            }
        }
    }
}
