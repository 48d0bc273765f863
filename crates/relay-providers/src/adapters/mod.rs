//! Capability adapter implementations
//!
//! One adapter per capability family; each registers itself into
//! `CAPABILITY_ADAPTERS` and dispatches on the vendor named in the provider's
//! configuration (or its id).
//!
//! | Capability | Adapter | Vendors |
//! |------------|---------|---------|
//! | `images` | [`ImageSearchAdapter`] | Unsplash, Pixabay, Pexels |
//! | `news` | [`NewsAdapter`] | NewsAPI, GNews |
//! | `weather` | [`WeatherAdapter`] | OpenWeatherMap, WeatherAPI |
//! | `pets` | [`PetsAdapter`] | TheDogAPI, TheCatAPI |
//! | `avatar-generation` | [`AvatarAdapter`] | D-ID, HeyGen |

pub mod avatar;
pub mod images;
pub mod news;
pub mod pets;
pub mod weather;

pub use avatar::AvatarAdapter;
pub use images::ImageSearchAdapter;
pub use news::NewsAdapter;
pub use pets::PetsAdapter;
pub use weather::WeatherAdapter;

use relay_domain::value_objects::Payload;

use crate::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::utils::JsonExt;

/// Requested page size, clamped to `1..=MAX_PAGE_SIZE`
pub(crate) fn page_size(payload: &Payload, key: &str) -> u64 {
    payload
        .u64_or(key, DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE)
}
