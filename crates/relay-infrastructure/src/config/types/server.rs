//! HTTP server and admin API configuration types

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_ADMIN_KEY_HEADER, DEFAULT_HTTP_PORT, DEFAULT_SERVER_HOST};

/// Bind address of the HTTP API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// TCP port
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_SERVER_HOST.to_string(),
            port: DEFAULT_HTTP_PORT,
        }
    }
}

/// Admin endpoint protection
///
/// With `enabled` set and no `key` configured every admin request is
/// rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Require the admin key on admin routes
    pub enabled: bool,
    /// Header carrying the key
    pub header: String,
    /// Expected key
    pub key: Option<String>,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            header: DEFAULT_ADMIN_KEY_HEADER.to_string(),
            key: None,
        }
    }
}
