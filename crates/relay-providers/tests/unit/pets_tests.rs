//! Pets adapter against a mock vendor

use mockito::{Matcher, Server};
use relay_domain::entities::AuthenticationType;
use relay_domain::error::AttemptError;
use relay_domain::ports::CapabilityAdapter;
use relay_providers::PetsAdapter;
use serde_json::json;

use crate::support::{TIMEOUT, TestCredentials, base, harness, payload, provider};

#[tokio::test]
async fn cat_pictures_are_listed() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/images/search")
        .match_query(Matcher::UrlEncoded("limit".into(), "2".into()))
        .with_status(200)
        .with_body(
            json!([
                {"id": "a", "url": "https://cats/a.jpg", "width": 640, "height": 480},
                {"id": "b", "url": "https://cats/b.jpg"}
            ])
            .to_string(),
        )
        .create_async()
        .await;

    let adapter = PetsAdapter::new(harness(TestCredentials::with(&[])));
    let p = provider("thecatapi", "pets", AuthenticationType::None, base(&server.url()));
    let outcome = adapter
        .attempt(&p, &payload(json!({"limit": 2})), TIMEOUT)
        .await;

    mock.assert_async().await;
    let data = outcome.data.unwrap();
    assert_eq!(data["animal"], "cat");
    assert_eq!(data["count"], 2);
    assert_eq!(data["images"][1]["width"], 0);
}

#[tokio::test]
async fn object_body_is_invalid_response() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/images/search")
        .with_status(200)
        .with_body(json!({"message": "nope"}).to_string())
        .create_async()
        .await;

    let adapter = PetsAdapter::new(harness(TestCredentials::with(&[])));
    let p = provider("thedogapi", "pets", AuthenticationType::None, base(&server.url()));
    let outcome = adapter.attempt(&p, &payload(json!({})), TIMEOUT).await;

    assert!(matches!(
        outcome.error,
        Some(AttemptError::InvalidResponse { .. })
    ));
}
