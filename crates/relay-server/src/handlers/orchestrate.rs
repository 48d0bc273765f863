//! Orchestration endpoint

use relay_domain::value_objects::OrchestrationResult;
use relay_infrastructure::AppContext;
use rocket::http::Status;
use rocket::serde::json::{self, Json};
use rocket::{State, post};
use tracing::info;

use crate::error::ApiError;
use crate::models::OrchestrateBody;

/// Serve one capability request through the provider chain
///
/// The full [`OrchestrationResult`] is returned either way. Success answers
/// 200; a payload the adapter rejects answers 400, a failure answers 503 when
/// no provider was attempted and 502 when every attempted provider failed.
#[post("/orchestrate", data = "<body>")]
pub async fn orchestrate(
    app: &State<AppContext>,
    body: Result<Json<OrchestrateBody>, json::Error<'_>>,
) -> Result<(Status, Json<OrchestrationResult>), ApiError> {
    let request = super::body(body)?.into_request(app)?;
    let result = app.engine.orchestrate(request).await;
    info!(
        request_id = %result.request_id,
        status = ?result.status,
        provider = result.provider_used.as_deref().unwrap_or("-"),
        attempts = result.total_attempts,
        "Orchestration request served"
    );

    let status = if result.is_success() {
        Status::Ok
    } else if result.is_caller_error() {
        Status::BadRequest
    } else if result.total_attempts == 0 {
        Status::ServiceUnavailable
    } else {
        Status::BadGateway
    };
    Ok((status, Json(result)))
}
