//! Provider-specific constants

// ============================================================================
// HTTP
// ============================================================================

/// JSON content type
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Default header carrying an API key when the configuration names none
pub const DEFAULT_API_KEY_HEADER: &str = "X-Api-Key";

/// Default credential name holding the vendor key
pub const DEFAULT_CREDENTIAL_NAME: &str = "api_key";

/// Credential name of the basic auth user
pub const CREDENTIAL_USERNAME: &str = "username";
/// Credential name of the basic auth password
pub const CREDENTIAL_PASSWORD: &str = "password";

// ============================================================================
// VENDOR BASE URLS
// ============================================================================

/// Unsplash API
pub const UNSPLASH_BASE_URL: &str = "https://api.unsplash.com";
/// Pixabay API
pub const PIXABAY_BASE_URL: &str = "https://pixabay.com/api";
/// Pexels API
pub const PEXELS_BASE_URL: &str = "https://api.pexels.com/v1";
/// NewsAPI
pub const NEWSAPI_BASE_URL: &str = "https://newsapi.org/v2";
/// GNews API
pub const GNEWS_BASE_URL: &str = "https://gnews.io/api/v4";
/// OpenWeatherMap API
pub const OPENWEATHERMAP_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
/// WeatherAPI
pub const WEATHERAPI_BASE_URL: &str = "https://api.weatherapi.com/v1";
/// TheDogAPI
pub const THEDOGAPI_BASE_URL: &str = "https://api.thedogapi.com/v1";
/// TheCatAPI
pub const THECATAPI_BASE_URL: &str = "https://api.thecatapi.com/v1";
/// D-ID API
pub const DID_BASE_URL: &str = "https://api.d-id.com";
/// HeyGen API
pub const HEYGEN_BASE_URL: &str = "https://api.heygen.com";

// ============================================================================
// PAYLOAD DEFAULTS
// ============================================================================

/// Results requested when the payload sets no page size
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Upper bound on requested page size
pub const MAX_PAGE_SIZE: u64 = 50;
