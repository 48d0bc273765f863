//! # Relay - Capability Adapters
//!
//! Vendor integrations for every capability Relay orchestrates. Each adapter
//! implements [`CapabilityAdapter`] from `relay-domain` and registers itself
//! into the `CAPABILITY_ADAPTERS` slice so the infrastructure layer can build
//! the adapter registry without naming concrete types.
//!
//! | Capability | Adapter | Vendors |
//! |------------|---------|---------|
//! | `images` | `ImageSearchAdapter` | Unsplash, Pixabay, Pexels |
//! | `news` | `NewsAdapter` | NewsAPI, GNews |
//! | `weather` | `WeatherAdapter` | OpenWeatherMap, WeatherAPI |
//! | `pets` | `PetsAdapter` | TheDogAPI, TheCatAPI |
//! | `avatar-generation` | `AvatarAdapter` | D-ID, HeyGen |
//!
//! ## Vendor configuration
//!
//! Adapters read the provider's `configuration` blob as a [`VendorConfig`]:
//!
//! ```json
//! { "vendor": "unsplash", "key_header": "Authorization", "key_prefix": "Client-ID " }
//! ```
//!
//! Every field is optional; the vendor defaults to the provider id.

pub use relay_domain::error::{AttemptError, Error, Result};
pub use relay_domain::ports::CapabilityAdapter;

/// Provider-specific constants
pub mod constants;

/// Shared utilities for adapter implementations
pub mod utils;

/// HTTP harness shared by adapters
///
/// Client construction, authentication schemes and response mapping.
pub mod http;

/// Capability adapter implementations
pub mod adapters;

pub use adapters::{AvatarAdapter, ImageSearchAdapter, NewsAdapter, PetsAdapter, WeatherAdapter};
pub use http::{HttpHarness, VendorCall, VendorConfig};
