//! Category policy administration

use relay_domain::value_objects::CategoryPolicy;
use relay_infrastructure::AppContext;
use rocket::serde::json::{self, Json};
use rocket::{State, get, put};

use super::body;
use crate::auth::AdminAuth;
use crate::error::ApiResult;
use crate::models::CategoryBody;

#[get("/policy")]
pub fn get_policy(_auth: AdminAuth, app: &State<AppContext>) -> Json<CategoryPolicy> {
    Json(app.admin.policy())
}

/// Replace the whole policy
#[put("/policy", data = "<policy>")]
pub fn set_policy(
    _auth: AdminAuth,
    app: &State<AppContext>,
    policy: Result<Json<CategoryPolicy>, json::Error<'_>>,
) -> ApiResult<CategoryPolicy> {
    Ok(Json(app.admin.set_policy(body(policy)?)))
}

/// Allow or block one category
#[put("/policy/<category>", data = "<rule>")]
pub fn set_category(
    _auth: AdminAuth,
    app: &State<AppContext>,
    category: &str,
    rule: Result<Json<CategoryBody>, json::Error<'_>>,
) -> ApiResult<CategoryPolicy> {
    let allowed = body(rule)?.allowed;
    Ok(Json(app.admin.set_category(category, allowed)))
}
