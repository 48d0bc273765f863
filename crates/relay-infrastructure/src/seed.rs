//! Provider seeding
//!
//! On first boot the repository is filled from the configured provider list,
//! or from the built-in catalogue below when the configuration declares none.

use relay_domain::constants::{
    CAPABILITY_AVATAR_GENERATION, CAPABILITY_IMAGES, CAPABILITY_NEWS, CAPABILITY_PETS,
    CAPABILITY_WEATHER,
};
use relay_domain::entities::AuthenticationType;
use relay_domain::error::Result;
use relay_domain::ports::ProviderRepository;
use serde_json::json;
use tracing::info;

use crate::config::ProviderConfig;

/// Built-in provider catalogue
pub fn default_providers() -> Vec<ProviderConfig> {
    vec![
        ProviderConfig::new("unsplash", "Unsplash", CAPABILITY_IMAGES)
            .priority(1)
            .auth(AuthenticationType::ApiKey)
            .configuration(json!({"key_header": "Authorization", "key_prefix": "Client-ID "}))
            .per_day(1_200),
        ProviderConfig::new("pixabay", "Pixabay", CAPABILITY_IMAGES)
            .priority(2)
            .auth(AuthenticationType::ApiKey)
            .configuration(json!({"key_param": "key"}))
            .per_minute(100),
        ProviderConfig::new("pexels", "Pexels", CAPABILITY_IMAGES)
            .priority(3)
            .auth(AuthenticationType::ApiKey)
            .configuration(json!({"key_header": "Authorization"}))
            .per_day(5_000),
        ProviderConfig::new("newsapi", "NewsAPI", CAPABILITY_NEWS)
            .priority(1)
            .auth(AuthenticationType::ApiKey)
            .per_day(100),
        ProviderConfig::new("gnews", "GNews", CAPABILITY_NEWS)
            .priority(2)
            .auth(AuthenticationType::ApiKey)
            .configuration(json!({"key_param": "apikey"}))
            .per_day(100),
        ProviderConfig::new("openweathermap", "OpenWeatherMap", CAPABILITY_WEATHER)
            .priority(1)
            .auth(AuthenticationType::ApiKey)
            .configuration(json!({"key_param": "appid"}))
            .per_minute(60),
        ProviderConfig::new("weatherapi", "WeatherAPI", CAPABILITY_WEATHER)
            .priority(2)
            .auth(AuthenticationType::ApiKey)
            .configuration(json!({"key_param": "key"})),
        ProviderConfig::new("thedogapi", "TheDogAPI", CAPABILITY_PETS).priority(1),
        ProviderConfig::new("thecatapi", "TheCatAPI", CAPABILITY_PETS).priority(2),
        ProviderConfig::new("d-id", "D-ID", CAPABILITY_AVATAR_GENERATION)
            .priority(1)
            .auth(AuthenticationType::BasicAuth),
        ProviderConfig::new("heygen", "HeyGen", CAPABILITY_AVATAR_GENERATION)
            .priority(2)
            .auth(AuthenticationType::ApiKey),
    ]
}

/// Register `providers` (or the catalogue) when the repository is empty
///
/// Returns the number of providers registered.
pub async fn seed_providers(
    repository: &dyn ProviderRepository,
    providers: &[ProviderConfig],
) -> Result<usize> {
    if !repository.list_all().await?.is_empty() {
        return Ok(0);
    }

    let providers = if providers.is_empty() {
        default_providers()
    } else {
        providers.to_vec()
    };
    let count = providers.len();
    for provider in providers {
        repository.upsert(provider.into_provider()).await?;
    }
    info!(count, "Seeded provider registry");
    Ok(count)
}
