//! Weather adapter against a mock vendor

use mockito::{Matcher, Server};
use relay_domain::entities::AuthenticationType;
use relay_domain::error::AttemptError;
use relay_domain::ports::CapabilityAdapter;
use relay_providers::WeatherAdapter;
use serde_json::json;

use crate::support::{TIMEOUT, TestCredentials, harness, payload, provider};

#[tokio::test]
async fn openweathermap_current_conditions() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/weather")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("q".into(), "Porto".into()),
            Matcher::UrlEncoded("units".into(), "metric".into()),
            Matcher::UrlEncoded("appid".into(), "ow".into()),
        ]))
        .with_status(200)
        .with_body(
            json!({
                "name": "Porto",
                "main": {"temp": 18.5, "humidity": 70},
                "weather": [{"description": "light rain"}],
                "wind": {"speed": 4.2}
            })
            .to_string(),
        )
        .create_async()
        .await;

    let adapter = WeatherAdapter::new(harness(TestCredentials::with(&[(
        "openweathermap",
        "api_key",
        "ow",
    )])));
    let p = provider(
        "openweathermap",
        "weather",
        AuthenticationType::ApiKey,
        json!({"base_url": server.url(), "key_param": "appid"}),
    );
    let outcome = adapter
        .attempt(&p, &payload(json!({"city": "Porto"})), TIMEOUT)
        .await;

    mock.assert_async().await;
    let data = outcome.data.unwrap();
    assert_eq!(data["location"], "Porto");
    assert_eq!(data["temperature"], 18.5);
    assert_eq!(data["description"], "light rain");
    assert_eq!(data["units"], "metric");
}

#[tokio::test]
async fn city_is_required() {
    let adapter = WeatherAdapter::new(harness(TestCredentials::with(&[])));
    let p = provider(
        "weatherapi",
        "weather",
        AuthenticationType::None,
        json!({"base_url": "http://127.0.0.1:9"}),
    );
    let outcome = adapter.attempt(&p, &payload(json!({})), TIMEOUT).await;

    assert!(matches!(
        outcome.error,
        Some(AttemptError::InvalidPayload { .. })
    ));
}

#[tokio::test]
async fn non_json_body_is_invalid_response() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/current.json")
        .with_status(200)
        .with_body("<html>maintenance</html>")
        .create_async()
        .await;

    let adapter = WeatherAdapter::new(harness(TestCredentials::with(&[])));
    let p = provider(
        "weatherapi",
        "weather",
        AuthenticationType::None,
        json!({"base_url": server.url()}),
    );
    let outcome = adapter
        .attempt(&p, &payload(json!({"city": "Faro"})), TIMEOUT)
        .await;

    assert!(matches!(
        outcome.error,
        Some(AttemptError::InvalidResponse { .. })
    ));
}
