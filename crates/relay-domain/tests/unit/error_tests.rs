//! Unit tests for error types

use relay_domain::error::{AttemptError, Error};

#[test]
fn test_terminal_error_messages() {
    assert_eq!(
        Error::no_providers("images").to_string(),
        "no available providers for capability images"
    );
    assert_eq!(
        Error::no_alternatives("news").to_string(),
        "no alternative providers available"
    );
    assert_eq!(
        Error::exhausted("weather", vec!["A".into(), "B".into()]).to_string(),
        "all 2 providers failed for capability weather"
    );
}

#[test]
fn test_helper_constructors() {
    assert!(matches!(Error::not_found("provider x"), Error::NotFound { .. }));
    assert!(matches!(
        Error::invalid_argument("bad"),
        Error::InvalidArgument { .. }
    ));
    assert!(matches!(
        Error::configuration("bad"),
        Error::Configuration { source: None, .. }
    ));
}

#[test]
fn test_attempt_error_classification() {
    let limited = AttemptError::RateLimited {
        message: "quota".into(),
    };
    let timeout = AttemptError::Timeout { timeout_ms: 50 };

    assert!(limited.is_rate_limited());
    assert!(!limited.is_timeout());
    assert!(timeout.is_timeout());
    assert_eq!(timeout.to_string(), "timed out after 50ms");
}

#[test]
fn test_attempt_error_serialization_is_tagged() {
    let err = AttemptError::VendorHttp {
        status: 503,
        body_excerpt: "down".into(),
    };
    let value = serde_json::to_value(&err).expect("serialization should succeed");

    assert_eq!(value["kind"], "vendor_http");
    assert_eq!(value["status"], 503);
}
