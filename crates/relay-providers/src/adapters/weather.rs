//! Weather Adapter
//!
//! Serves the `weather` capability from OpenWeatherMap or WeatherAPI.
//! Payload: `city` (required), `units` (`metric` or `imperial`, default
//! `metric`). Output:
//!
//! ```json
//! { "location", "temperature", "humidity", "description", "wind_speed", "units" }
//! ```

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use relay_application::ports::registry::{AdapterContext, CAPABILITY_ADAPTERS, CapabilityAdapterEntry};
use relay_domain::constants::CAPABILITY_WEATHER;
use relay_domain::entities::Provider;
use relay_domain::error::AttemptError;
use relay_domain::ports::CapabilityAdapter;
use relay_domain::value_objects::{AttemptOutcome, Credentials, Payload};
use serde_json::{Value, json};

use crate::constants::{OPENWEATHERMAP_BASE_URL, WEATHERAPI_BASE_URL};
use crate::http::{HttpHarness, VendorCall, VendorConfig};
use crate::utils::JsonExt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WeatherVendor {
    OpenWeatherMap,
    WeatherApi,
}

impl WeatherVendor {
    fn parse(name: &str) -> Result<Self, AttemptError> {
        match name.to_ascii_lowercase().as_str() {
            "openweathermap" => Ok(Self::OpenWeatherMap),
            "weatherapi" => Ok(Self::WeatherApi),
            other => Err(AttemptError::configuration(format!(
                "unsupported weather vendor '{other}'"
            ))),
        }
    }
}

fn missing(field: &str) -> AttemptError {
    AttemptError::invalid_response(format!("missing '{field}' in weather response"))
}

fn normalize(vendor: WeatherVendor, body: &Value, imperial: bool) -> Result<Value, AttemptError> {
    let units = if imperial { "imperial" } else { "metric" };
    match vendor {
        WeatherVendor::OpenWeatherMap => {
            let main = &body["main"];
            Ok(json!({
                "location": body.str_or("name", ""),
                "temperature": main.opt_f64("temp").ok_or_else(|| missing("main.temp"))?,
                "humidity": main.opt_f64("humidity"),
                "description": body["weather"][0].str_or("description", ""),
                "wind_speed": body["wind"].opt_f64("speed"),
                "units": units,
            }))
        }
        WeatherVendor::WeatherApi => {
            let current = &body["current"];
            let (temp_key, wind_key) = if imperial {
                ("temp_f", "wind_mph")
            } else {
                ("temp_c", "wind_kph")
            };
            let wind = current.opt_f64(wind_key).map(|w| if imperial { w } else { w / 3.6 });
            Ok(json!({
                "location": body["location"].str_or("name", ""),
                "temperature": current.opt_f64(temp_key).ok_or_else(|| missing(temp_key))?,
                "humidity": current.opt_f64("humidity"),
                "description": current["condition"].str_or("text", ""),
                "wind_speed": wind,
                "units": units,
            }))
        }
    }
}

/// Current weather adapter
pub struct WeatherAdapter {
    http: HttpHarness,
}

impl WeatherAdapter {
    /// Create the adapter
    pub fn new(http: HttpHarness) -> Self {
        Self { http }
    }

    async fn current(
        &self,
        provider: &Provider,
        payload: &Payload,
        timeout: Duration,
    ) -> Result<Value, AttemptError> {
        let config = VendorConfig::from_provider(provider)?;
        let vendor = WeatherVendor::parse(config.vendor(provider))?;
        let city = payload.required_str("city")?.to_string();
        let imperial = payload.str_or("units", "metric") == "imperial";
        let call = VendorCall {
            provider,
            config: &config,
            timeout,
        };

        let body = match vendor {
            WeatherVendor::OpenWeatherMap => {
                let base = config.base_url(OPENWEATHERMAP_BASE_URL);
                let units = if imperial { "imperial" } else { "metric" };
                self.http
                    .get_json(
                        &call,
                        &format!("{base}/weather"),
                        &[("q", city), ("units", units.to_string())],
                    )
                    .await?
            }
            WeatherVendor::WeatherApi => {
                let base = config.base_url(WEATHERAPI_BASE_URL);
                self.http
                    .get_json(&call, &format!("{base}/current.json"), &[("q", city)])
                    .await?
            }
        };

        normalize(vendor, &body, imperial)
    }
}

#[async_trait]
impl CapabilityAdapter for WeatherAdapter {
    fn capability(&self) -> &str {
        CAPABILITY_WEATHER
    }

    async fn attempt(
        &self,
        provider: &Provider,
        payload: &Payload,
        timeout: Duration,
    ) -> AttemptOutcome {
        self.current(provider, payload, timeout).await.into()
    }

    fn credentials(&self, provider_key: &str) -> Option<Credentials> {
        self.http.credentials(provider_key)
    }
}

fn weather_factory(
    context: &AdapterContext,
) -> std::result::Result<Arc<dyn CapabilityAdapter>, String> {
    Ok(Arc::new(WeatherAdapter::new(HttpHarness::new(context)?)))
}

#[linkme::distributed_slice(CAPABILITY_ADAPTERS)]
static WEATHER_ADAPTER: CapabilityAdapterEntry = CapabilityAdapterEntry {
    capability: CAPABILITY_WEATHER,
    description: "Current weather (OpenWeatherMap, WeatherAPI)",
    factory: weather_factory,
};
