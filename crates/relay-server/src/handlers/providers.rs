//! Provider administration
//!
//! Every route here requires [`AdminAuth`].

use relay_application::ProviderView;
use relay_domain::value_objects::{RotationOutcome, UsageEffect, UsageReport};
use relay_infrastructure::AppContext;
use relay_infrastructure::config::ProviderConfig;
use rocket::http::Status;
use rocket::serde::json::{self, Json};
use rocket::{State, get, post, put};

use super::body;
use crate::auth::AdminAuth;
use crate::error::{ApiError, ApiResult};
use crate::models::{ActionResponse, CredentialBody, HealthOverride};

/// Providers with derived status, optionally for one capability
#[get("/providers?<capability>")]
pub async fn list_providers(
    _auth: AdminAuth,
    app: &State<AppContext>,
    capability: Option<&str>,
) -> ApiResult<Vec<ProviderView>> {
    Ok(Json(app.admin.list_providers(capability).await?))
}

/// Register a provider or replace its policy fields
#[post("/providers", data = "<provider>")]
pub async fn register_provider(
    _auth: AdminAuth,
    app: &State<AppContext>,
    provider: Result<Json<ProviderConfig>, json::Error<'_>>,
) -> Result<(Status, Json<ProviderView>), ApiError> {
    let provider = body(provider)?.into_provider();
    let view = app.admin.register_provider(provider).await?;
    Ok((Status::Created, Json(view)))
}

/// One provider
#[get("/providers/<id>")]
pub async fn get_provider(
    _auth: AdminAuth,
    app: &State<AppContext>,
    id: &str,
) -> ApiResult<ProviderView> {
    Ok(Json(app.admin.get_provider(id).await?))
}

/// Enable a provider and close its circuit
#[post("/providers/<id>/enable")]
pub async fn enable_provider(
    _auth: AdminAuth,
    app: &State<AppContext>,
    id: &str,
) -> ApiResult<ProviderView> {
    Ok(Json(app.admin.set_enabled(id, true).await?))
}

/// Disable a provider
#[post("/providers/<id>/disable")]
pub async fn disable_provider(
    _auth: AdminAuth,
    app: &State<AppContext>,
    id: &str,
) -> ApiResult<ProviderView> {
    Ok(Json(app.admin.set_enabled(id, false).await?))
}

/// Override the health classification
#[put("/providers/<id>/health", data = "<status>")]
pub async fn set_health(
    _auth: AdminAuth,
    app: &State<AppContext>,
    id: &str,
    status: Result<Json<HealthOverride>, json::Error<'_>>,
) -> ApiResult<ProviderView> {
    let status = body(status)?.status;
    Ok(Json(app.admin.set_health_status(id, status).await?))
}

/// Store a secret for a provider
///
/// The value is never echoed back.
#[put("/providers/<id>/credentials", data = "<credential>")]
pub async fn upsert_credential(
    _auth: AdminAuth,
    app: &State<AppContext>,
    id: &str,
    credential: Result<Json<CredentialBody>, json::Error<'_>>,
) -> ApiResult<ActionResponse> {
    let credential = body(credential)?;
    app.admin
        .upsert_credential(id, &credential.name, &credential.value)
        .await?;
    Ok(Json(ActionResponse::success(format!(
        "credential '{}' stored for provider '{id}'",
        credential.name
    ))))
}

/// Feed an externally observed outcome into the circuit breaker
#[post("/providers/<id>/usage", data = "<report>")]
pub async fn report_usage(
    _auth: AdminAuth,
    app: &State<AppContext>,
    id: &str,
    report: Result<Json<UsageReport>, json::Error<'_>>,
) -> ApiResult<UsageEffect> {
    let report = body(report)?;
    Ok(Json(app.admin.report_usage(id, report).await?))
}

/// Move the default of a capability to the next provider in line
#[post("/capabilities/<capability>/rotate")]
pub async fn rotate(
    _auth: AdminAuth,
    app: &State<AppContext>,
    capability: &str,
) -> ApiResult<RotationOutcome> {
    Ok(Json(app.admin.rotate(capability).await?))
}
