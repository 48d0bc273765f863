//! Error responses
//!
//! Domain errors map onto HTTP statuses with a JSON body
//! `{ "error": <kind>, "message": <text> }`.

use relay_domain::error::Error;
use rocket::http::Status;
use rocket::request::Request;
use rocket::response::{self, Responder};
use rocket::serde::json::Json;
use serde::Serialize;

/// JSON error body
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    /// Machine-readable kind
    pub error: &'static str,
    /// Human-readable detail
    pub message: String,
}

/// Error returned by API handlers
#[derive(Debug)]
pub struct ApiError {
    /// Response status
    pub status: Status,
    /// Response body
    pub body: ErrorBody,
}

impl ApiError {
    /// Error with an explicit status
    pub fn new(status: Status, error: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody {
                error,
                message: message.into(),
            },
        }
    }

    /// 400 with an `invalid_argument` body
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(Status::BadRequest, "invalid_argument", message)
    }
}

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        let (status, kind) = match &error {
            Error::NotFound { .. } => (Status::NotFound, "not_found"),
            Error::UnknownCapability { .. } => (Status::NotFound, "unknown_capability"),
            Error::InvalidArgument { .. } => (Status::BadRequest, "invalid_argument"),
            Error::Json { .. } => (Status::BadRequest, "invalid_json"),
            Error::NoAlternativeProviders { .. } => (Status::Conflict, "no_alternative_providers"),
            Error::NoProvidersAvailable { .. } => {
                (Status::ServiceUnavailable, "no_providers_available")
            }
            Error::AllProvidersExhausted { .. } => (Status::BadGateway, "all_providers_exhausted"),
            _ => (Status::InternalServerError, "internal_error"),
        };
        if status == Status::InternalServerError {
            tracing::error!(error = %error, "Request failed");
        }
        Self::new(status, kind, error.to_string())
    }
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        (self.status, Json(self.body)).respond_to(request)
    }
}

/// Result type of API handlers
pub type ApiResult<T> = std::result::Result<Json<T>, ApiError>;
