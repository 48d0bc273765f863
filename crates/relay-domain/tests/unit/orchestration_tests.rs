//! Unit tests for orchestration value objects

use std::time::Duration;

use relay_domain::error::AttemptError;
use relay_domain::value_objects::{
    AttemptOutcome, OrchestrationRequest, OrchestrationStatus, Payload,
};

#[test]
fn test_request_defaults() {
    let req = OrchestrationRequest::new("images", Payload::new());

    assert_eq!(req.capability, "images");
    assert_eq!(req.max_retries, 3);
    assert_eq!(req.timeout(), Duration::from_secs(30));
    assert!(!req.prefer_free);
}

#[test]
fn test_request_builders() {
    let req = OrchestrationRequest::new("news", Payload::new())
        .with_timeout(Duration::from_millis(250))
        .with_max_retries(5)
        .prefer_free(true);

    assert_eq!(req.timeout_ms, 250);
    assert_eq!(req.max_retries, 5);
    assert!(req.prefer_free);
}

#[test]
fn test_request_validate_rejects_zero_knobs() {
    let ok = OrchestrationRequest::new("news", Payload::new());
    assert!(ok.validate().is_ok());

    let zero_timeout = ok.clone().with_timeout(Duration::ZERO);
    let err = zero_timeout.validate().unwrap_err();
    assert!(err.to_string().contains("timeout_ms"));

    let zero_budget = ok.with_max_retries(0);
    let err = zero_budget.validate().unwrap_err();
    assert!(err.to_string().contains("max_retries"));
}

#[test]
fn test_only_payload_errors_are_caller_errors() {
    assert!(AttemptError::invalid_payload("'query' is required").is_caller_error());
    assert!(!AttemptError::network("reset").is_caller_error());
    assert!(!AttemptError::Timeout { timeout_ms: 5 }.is_caller_error());
}

#[test]
fn test_request_ids_are_unique() {
    let a = OrchestrationRequest::new("news", Payload::new());
    let b = OrchestrationRequest::new("news", Payload::new());

    assert_ne!(a.request_id, b.request_id);
}

#[test]
fn test_status_of_failure() {
    assert_eq!(
        OrchestrationStatus::of_failure(&AttemptError::Timeout { timeout_ms: 1 }),
        OrchestrationStatus::Timeout
    );
    assert_eq!(
        OrchestrationStatus::of_failure(&AttemptError::RateLimited {
            message: String::new()
        }),
        OrchestrationStatus::RateLimited
    );
    assert_eq!(
        OrchestrationStatus::of_failure(&AttemptError::network("reset")),
        OrchestrationStatus::Failed
    );
}

#[test]
fn test_attempt_outcome_from_result() {
    let ok: AttemptOutcome = Ok(serde_json::json!({"count": 3})).into();
    assert!(ok.success);
    assert!(ok.error.is_none());

    let failed: AttemptOutcome = Err(AttemptError::invalid_response("not json")).into();
    assert!(!failed.success);
    assert!(failed.data.is_none());
}
