//! JSON error catchers
//!
//! Replace Rocket's HTML error pages so every failure on the API answers
//! with the same `{ "error", "message" }` shape.

use rocket::serde::json::Json;
use rocket::{Catcher, Request, catch, catchers};

use crate::auth::{AdminAuthError, AuthErrorResponse};
use crate::error::ErrorBody;

fn auth_failure(request: &Request<'_>) -> Option<AuthErrorResponse> {
    request
        .local_cache(|| None::<AdminAuthError>)
        .as_ref()
        .map(AdminAuthError::response)
}

fn fallback(error: &'static str, message: impl Into<String>) -> Json<AuthErrorResponse> {
    Json(AuthErrorResponse {
        error,
        message: message.into(),
    })
}

#[catch(401)]
fn unauthorized(request: &Request<'_>) -> Json<AuthErrorResponse> {
    auth_failure(request).map_or_else(
        || fallback("unauthorized", "Authentication required"),
        Json,
    )
}

#[catch(503)]
fn unavailable(request: &Request<'_>) -> Json<AuthErrorResponse> {
    auth_failure(request).map_or_else(
        || fallback("service_unavailable", "Service unavailable"),
        Json,
    )
}

#[catch(404)]
fn not_found(request: &Request<'_>) -> Json<ErrorBody> {
    Json(ErrorBody {
        error: "not_found",
        message: format!("no route for {} {}", request.method(), request.uri()),
    })
}

#[catch(422)]
fn unprocessable() -> Json<ErrorBody> {
    Json(ErrorBody {
        error: "invalid_argument",
        message: "request could not be processed".to_string(),
    })
}

#[catch(500)]
fn internal() -> Json<ErrorBody> {
    Json(ErrorBody {
        error: "internal_error",
        message: "internal server error".to_string(),
    })
}

/// Catchers registered on the root mount
pub fn api_catchers() -> Vec<Catcher> {
    catchers![unauthorized, unavailable, not_found, unprocessable, internal]
}
