//! HTTP Response Utilities
//!
//! Translate vendor HTTP outcomes into [`AttemptError`]s.

use std::time::Duration;

use relay_domain::constants::BODY_EXCERPT_MAX_LEN;
use relay_domain::error::AttemptError;
use relay_domain::utils::truncate_chars;
use reqwest::{Response, StatusCode};

/// Map a transport error, distinguishing timeouts
pub fn map_send_error(error: &reqwest::Error, timeout: Duration) -> AttemptError {
    if error.is_timeout() {
        AttemptError::Timeout {
            timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
        }
    } else {
        AttemptError::network(format!("HTTP request failed: {error}"))
    }
}

/// Utilities for processing HTTP responses
pub struct HttpResponseUtils;

impl HttpResponseUtils {
    /// Check response status and parse JSON
    ///
    /// | Status | Result |
    /// |--------|--------|
    /// | 2xx with JSON body | `Ok(value)` |
    /// | 2xx with other body | `InvalidResponse` |
    /// | 429 | `RateLimited` |
    /// | any other | `VendorHttp` with a truncated body excerpt |
    pub async fn check_and_parse(
        response: Response,
        provider_name: &str,
    ) -> Result<serde_json::Value, AttemptError> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            let body_excerpt = truncate_chars(error_text.trim(), BODY_EXCERPT_MAX_LEN);

            return Err(if status == StatusCode::TOO_MANY_REQUESTS {
                AttemptError::RateLimited {
                    message: format!("{provider_name}: {body_excerpt}"),
                }
            } else {
                AttemptError::VendorHttp {
                    status: status.as_u16(),
                    body_excerpt,
                }
            });
        }

        response.json().await.map_err(|e| {
            AttemptError::invalid_response(format!("{provider_name} response parse failed: {e}"))
        })
    }
}
