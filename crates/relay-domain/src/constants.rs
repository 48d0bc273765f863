//! Domain layer constants
//!
//! Contains constants that are part of the orchestration rules and are used by
//! the application layer. Infrastructure-specific constants remain in
//! `relay_infrastructure::constants`.

// ============================================================================
// CIRCUIT BREAKER CONSTANTS
// ============================================================================

/// Recent error count at which an `auto_disable` provider is switched off
pub const AUTO_DISABLE_ERROR_THRESHOLD: u32 = 5;

/// Recent error count at which a provider is reported as degraded
pub const DEGRADED_ERROR_THRESHOLD: u32 = 2;

/// Maximum stored length (in characters) of a provider's last error message
pub const ERROR_MESSAGE_MAX_LEN: usize = 300;

/// Maximum length (in characters) of a vendor response body kept in errors
pub const BODY_EXCERPT_MAX_LEN: usize = 200;

// ============================================================================
// ORCHESTRATION CONSTANTS
// ============================================================================

/// Default per-attempt timeout in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Default maximum number of provider attempts per request
pub const DEFAULT_MAX_RETRIES: usize = 3;

/// Key under which orchestration metadata is attached to successful responses
pub const ORCHESTRATION_METADATA_KEY: &str = "orchestration";

// ============================================================================
// CAPABILITY NAMES
// ============================================================================

/// Image search capability
pub const CAPABILITY_IMAGES: &str = "images";

/// News search capability
pub const CAPABILITY_NEWS: &str = "news";

/// Current weather capability
pub const CAPABILITY_WEATHER: &str = "weather";

/// Pet pictures capability
pub const CAPABILITY_PETS: &str = "pets";

/// Talking-avatar generation capability
pub const CAPABILITY_AVATAR_GENERATION: &str = "avatar-generation";
