//! Composition root wiring and end-to-end orchestration

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use relay_application::AdapterRegistry;
use relay_domain::entities::Provider;
use relay_domain::error::AttemptError;
use relay_domain::ports::{CapabilityAdapter, CredentialStore};
use relay_domain::value_objects::{
    AttemptOutcome, Credentials, OrchestrationStatus, Payload,
};
use relay_infrastructure::config::{ConfigBuilder, ProviderConfig};
use relay_infrastructure::credentials::InMemoryCredentialStore;
use relay_infrastructure::{init_app, init_app_with};
use serde_json::json;

#[tokio::test]
async fn empty_configuration_seeds_the_catalogue() {
    let app = init_app(ConfigBuilder::new().build()).await.unwrap();

    let providers = app.admin.list_providers(None).await.unwrap();
    assert_eq!(providers.len(), 11);
    assert_eq!(
        app.capabilities(),
        ["avatar-generation", "images", "news", "pets", "weather"]
    );
}

#[tokio::test]
async fn configured_providers_replace_the_catalogue() {
    let config = ConfigBuilder::new()
        .with_provider(ProviderConfig::new("thedogapi", "TheDogAPI", "pets"))
        .with_credential("thedogapi", "api_key", "dk")
        .build();
    let app = init_app(config).await.unwrap();

    let providers = app.admin.list_providers(None).await.unwrap();
    assert_eq!(providers.len(), 1);
    assert!(app.credentials.has("thedogapi"));
}

#[tokio::test]
async fn request_carries_configured_defaults() {
    let mut config = ConfigBuilder::new().build();
    config.orchestration.default_timeout_ms = 1_500;
    config.orchestration.default_prefer_free = true;
    let app = init_app(config).await.unwrap();

    let request = app.request("news", Payload::new());
    assert_eq!(request.timeout(), Duration::from_millis(1_500));
    assert_eq!(request.max_retries, 3);
    assert!(request.prefer_free);
}

#[tokio::test]
async fn pets_fail_over_from_dogs_to_cats_over_http() {
    let mut dogs = mockito::Server::new_async().await;
    let mut cats = mockito::Server::new_async().await;
    dogs.mock("GET", "/images/search")
        .with_status(503)
        .with_body("down")
        .create_async()
        .await;
    cats.mock("GET", "/images/search")
        .with_status(200)
        .with_body(json!([{"id": "c1", "url": "https://cats/c1.jpg"}]).to_string())
        .create_async()
        .await;

    let config = ConfigBuilder::new()
        .with_provider(
            ProviderConfig::new("thedogapi", "TheDogAPI", "pets")
                .priority(1)
                .configuration(json!({"base_url": dogs.url()})),
        )
        .with_provider(
            ProviderConfig::new("thecatapi", "TheCatAPI", "pets")
                .priority(2)
                .configuration(json!({"base_url": cats.url()})),
        )
        .build();
    let app = init_app(config).await.unwrap();

    let result = app.engine.orchestrate(app.request("pets", Payload::new())).await;

    assert_eq!(result.status, OrchestrationStatus::Success);
    assert_eq!(result.provider_used.as_deref(), Some("TheCatAPI"));
    assert_eq!(result.fallback_providers_tried, ["TheDogAPI"]);
    let data = result.response_data.unwrap();
    assert_eq!(data["images"][0]["id"], "c1");
    assert_eq!(data["orchestration"]["failover_triggered"], true);

    let dog = app.repository.get("thedogapi").await.unwrap().unwrap();
    assert_eq!(dog.health.recent_errors, 1);
    assert_eq!(dog.usage.day.count, 1);
}

struct EchoAdapter;

#[async_trait]
impl CapabilityAdapter for EchoAdapter {
    fn capability(&self) -> &str {
        "echo"
    }

    async fn attempt(&self, provider: &Provider, payload: &Payload, _: Duration) -> AttemptOutcome {
        if provider.id == "broken" {
            AttemptOutcome::failed(AttemptError::network("connection refused"))
        } else {
            AttemptOutcome::succeeded(json!({"echo": payload.clone()}))
        }
    }

    fn credentials(&self, _: &str) -> Option<Credentials> {
        None
    }
}

#[tokio::test]
async fn explicit_adapter_registry_and_breaker_thresholds() {
    let mut config = ConfigBuilder::new()
        .with_provider(ProviderConfig::new("broken", "Broken", "echo").priority(1))
        .with_provider(ProviderConfig::new("working", "Working", "echo").priority(2))
        .build();
    config.circuit_breaker.auto_disable_threshold = 2;
    config.circuit_breaker.degraded_threshold = 1;

    let credentials: Arc<dyn CredentialStore> = Arc::new(InMemoryCredentialStore::new());
    let mut adapters = AdapterRegistry::new();
    adapters.register(Arc::new(EchoAdapter));
    let app = init_app_with(config, credentials, adapters).await.unwrap();

    for _ in 0..2 {
        let result = app
            .engine
            .orchestrate(app.request("echo", json!({"q": 1}).as_object().cloned().unwrap_or_default()))
            .await;
        assert!(result.is_success());
    }

    let broken = app.repository.get("broken").await.unwrap().unwrap();
    assert!(!broken.enabled, "tripped after two recent errors");

    let result = app.engine.orchestrate(app.request("echo", Payload::new())).await;
    assert_eq!(result.total_attempts, 1);
    assert!(result.fallback_providers_tried.is_empty());
}
