//! Health and liveness probes

use relay_infrastructure::AppContext;
use rocket::serde::json::Json;
use rocket::{State, get};

use crate::error::ApiResult;
use crate::models::{HealthResponse, LivenessResponse};

/// Server status with provider totals
#[get("/health")]
pub async fn health(app: &State<AppContext>) -> ApiResult<HealthResponse> {
    let providers = app.admin.list_providers(None).await?;
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        capabilities: app.capabilities(),
        available_providers: providers.iter().filter(|p| p.available).count(),
        providers: providers.len(),
    }))
}

/// Liveness probe
#[get("/live")]
pub fn live() -> Json<LivenessResponse> {
    Json(LivenessResponse {
        status: "alive".to_string(),
    })
}
