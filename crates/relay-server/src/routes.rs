//! Route table and Rocket assembly

use std::sync::Arc;

use relay_infrastructure::AppContext;
use rocket::{Build, Rocket, Route, routes};

use crate::auth::AdminAuthConfig;
use crate::catchers::api_catchers;
use crate::handlers::{health, orchestrate, policy, providers};

/// Every API route
///
/// - GET `/health`, GET `/live`
/// - POST `/orchestrate`
/// - GET/POST `/providers`, GET `/providers/<id>`
/// - POST `/providers/<id>/enable`, POST `/providers/<id>/disable`
/// - PUT `/providers/<id>/health`, PUT `/providers/<id>/credentials`
/// - POST `/providers/<id>/usage`
/// - POST `/capabilities/<capability>/rotate`
/// - GET/PUT `/policy`, PUT `/policy/<category>`
pub fn api_routes() -> Vec<Route> {
    routes![
        health::health,
        health::live,
        orchestrate::orchestrate,
        providers::list_providers,
        providers::register_provider,
        providers::get_provider,
        providers::enable_provider,
        providers::disable_provider,
        providers::set_health,
        providers::upsert_credential,
        providers::report_usage,
        providers::rotate,
        policy::get_policy,
        policy::set_policy,
        policy::set_category,
    ]
}

/// Rocket instance serving `app`, admin auth taken from its configuration
pub fn relay_rocket(app: AppContext) -> Rocket<Build> {
    let auth = AdminAuthConfig::from_admin_config(&app.config.admin);
    relay_rocket_with_auth(app, auth)
}

/// Rocket instance with an explicit admin auth setting
pub fn relay_rocket_with_auth(app: AppContext, auth: AdminAuthConfig) -> Rocket<Build> {
    rocket::build()
        .manage(app)
        .manage(Arc::new(auth))
        .mount("/", api_routes())
        .register("/", api_catchers())
}
