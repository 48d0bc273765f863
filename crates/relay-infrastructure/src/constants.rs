//! Infrastructure layer constants
//!
//! Domain-specific constants are defined in `relay_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "relay.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "relay";

/// Environment variable prefix for configuration
///
/// Nested keys are separated by a double underscore:
/// `RELAY__SERVER__PORT=9000`.
pub const CONFIG_ENV_PREFIX: &str = "RELAY";

/// Separator between nested keys in environment variables
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the log filter
pub const LOG_ENV_VAR: &str = "RELAY_LOG";

/// Log file stem when the configured path has none
pub const DEFAULT_LOG_FILE_STEM: &str = "relay";

// ============================================================================
// HTTP SERVER CONSTANTS
// ============================================================================

/// Default HTTP server port
pub const DEFAULT_HTTP_PORT: u16 = 8080;

/// Default server host
pub const DEFAULT_SERVER_HOST: &str = "127.0.0.1";

/// Header carrying the admin API key
pub const DEFAULT_ADMIN_KEY_HEADER: &str = "X-Admin-Key";

// ============================================================================
// OUTBOUND HTTP CONSTANTS
// ============================================================================

/// Connection timeout for vendor calls in milliseconds
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 10_000;
