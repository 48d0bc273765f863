//! Admin key enforcement

use relay_infrastructure::config::ConfigBuilder;
use rocket::http::{Header, Status};
use serde_json::Value;

use crate::support::{admin_key, app_with, client, client_for, config};

async fn body(response: rocket::local::asynchronous::LocalResponse<'_>) -> Value {
    serde_json::from_str(&response.into_string().await.unwrap()).unwrap()
}

#[rocket::async_test]
async fn health_endpoints_need_no_key() {
    let client = client().await;

    let live = client.get("/live").dispatch().await;
    assert_eq!(live.status(), Status::Ok);
    assert_eq!(body(live).await["status"], "alive");

    let health = client.get("/health").dispatch().await;
    assert_eq!(health.status(), Status::Ok);
    let health = body(health).await;
    assert_eq!(health["providers"], 2);
    assert_eq!(health["capabilities"][0], "echo");
}

#[rocket::async_test]
async fn missing_key_is_rejected() {
    let client = client().await;

    let response = client.get("/providers").dispatch().await;
    assert_eq!(response.status(), Status::Unauthorized);
    let json = body(response).await;
    assert_eq!(json["error"], "missing_api_key");
    assert!(json["message"].as_str().unwrap().contains("X-Admin-Key"));
}

#[rocket::async_test]
async fn wrong_key_is_rejected() {
    let client = client().await;

    let response = client
        .get("/providers")
        .header(Header::new("X-Admin-Key", "nope"))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Unauthorized);
    assert_eq!(body(response).await["error"], "invalid_api_key");
}

#[rocket::async_test]
async fn correct_key_is_accepted() {
    let client = client().await;

    let response = client.get("/providers").header(admin_key()).dispatch().await;
    assert_eq!(response.status(), Status::Ok);
}

#[rocket::async_test]
async fn enabled_without_key_rejects_everything() {
    let mut config = config();
    config.admin.key = None;
    let client = client_for(app_with(config).await).await;

    let response = client.get("/policy").header(admin_key()).dispatch().await;
    assert_eq!(response.status(), Status::ServiceUnavailable);
    assert_eq!(body(response).await["error"], "auth_not_configured");
}

#[rocket::async_test]
async fn disabled_auth_lets_admin_routes_through() {
    let mut config = ConfigBuilder::new().build();
    config.admin.enabled = false;
    let client = client_for(app_with(config).await).await;

    let response = client.get("/policy").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
}

#[rocket::async_test]
async fn unknown_routes_answer_json() {
    let client = client().await;

    let response = client.get("/nowhere").dispatch().await;
    assert_eq!(response.status(), Status::NotFound);
    assert_eq!(body(response).await["error"], "not_found");
}
