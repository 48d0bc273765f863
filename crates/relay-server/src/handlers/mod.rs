//! Route handlers
//!
//! | Route | Guard | Handler |
//! |-------|-------|---------|
//! | `GET /health`, `GET /live` | none | [`health`] |
//! | `POST /orchestrate` | none | [`orchestrate`] |
//! | `/providers/...`, `/capabilities/<cap>/rotate` | admin key | [`providers`] |
//! | `/policy/...` | admin key | [`policy`] |

pub mod health;
pub mod orchestrate;
pub mod policy;
pub mod providers;

use rocket::serde::json::{self, Json};

use crate::error::ApiError;

/// Unwrap a JSON body, turning parse failures into a 400
pub(crate) fn body<T>(body: Result<Json<T>, json::Error<'_>>) -> Result<T, ApiError> {
    body.map(Json::into_inner)
        .map_err(|e| ApiError::bad_request(format!("invalid request body: {e}")))
}
