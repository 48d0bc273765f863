//! Failover loop behavior

use std::time::Duration;

use relay_domain::entities::{Provider, RateLimits};
use relay_domain::error::AttemptError;
use relay_domain::ports::{CredentialStore, PolicyStore};
use relay_domain::value_objects::{
    CategoryPolicy, OrchestrationRequest, OrchestrationStatus, Payload, ProviderStatus,
};
use serde_json::json;

use crate::support::{Harness, Script, http_500};

fn request(capability: &str, max_retries: usize) -> OrchestrationRequest {
    OrchestrationRequest::new(capability, Payload::new())
        .with_max_retries(max_retries)
        .with_timeout(Duration::from_millis(50))
}

fn images(ids: &[&str]) -> Vec<Provider> {
    ids.iter()
        .zip(1..)
        .map(|(id, priority)| Provider::new(*id, *id, "images").with_priority(priority))
        .collect()
}

#[tokio::test(start_paused = true)]
async fn test_timeout_fails_over_to_next_provider() {
    let providers = vec![
        Provider::new("unsplash", "Unsplash", "images").with_priority(1),
        Provider::new("pixabay", "Pixabay", "images").with_priority(2),
    ];
    let h = Harness::new("images", providers, |a| {
        a.script("unsplash", Script::Hang).script(
            "pixabay",
            Script::Succeed(json!({"images": [{"url": "a"}, {"url": "b"}, {"url": "c"}], "count": 3})),
        )
    });

    let result = h.engine.orchestrate(request("images", 2)).await;

    assert_eq!(result.status, OrchestrationStatus::Success);
    assert_eq!(result.provider_used.as_deref(), Some("Pixabay"));
    assert_eq!(result.total_attempts, 2);
    assert_eq!(result.fallback_providers_tried, ["Unsplash"]);
    assert_eq!(result.attempts[0].status, OrchestrationStatus::Timeout);

    let data = result.response_data.unwrap();
    assert_eq!(data["count"], 3);
    assert_eq!(data["orchestration"]["provider_used"], "Pixabay");
    assert_eq!(data["orchestration"]["attempt_index"], 2);
    assert_eq!(data["orchestration"]["failover_triggered"], true);

    let unsplash = h.repository.snapshot("unsplash");
    assert_eq!(unsplash.health.total_errors, 1);
    assert_eq!(unsplash.health.recent_errors, 1);
    let pixabay = h.repository.snapshot("pixabay");
    assert_eq!(pixabay.health.total_requests, 1);
    assert!(pixabay.health.last_success.is_some());
}

#[tokio::test]
async fn test_stops_at_first_success() {
    let h = Harness::new("images", images(&["a", "b", "c"]), |a| {
        a.script("a", http_500())
            .script("b", Script::Succeed(json!({"ok": true})))
            .script("c", Script::Succeed(json!({"ok": true})))
    });

    let result = h.engine.orchestrate(request("images", 3)).await;

    assert!(result.is_success());
    assert_eq!(result.total_attempts, 2);
    assert_eq!(h.adapter.calls(), ["a", "b"]);
    assert_eq!(h.repository.snapshot("c").health.total_requests, 0);
}

#[tokio::test]
async fn test_first_attempt_success_is_not_failover() {
    let h = Harness::new("images", images(&["a"]), |a| {
        a.script("a", Script::Succeed(json!("plain")))
    });

    let result = h.engine.orchestrate(request("images", 3)).await;
    let data = result.response_data.unwrap();

    assert_eq!(data["result"], "plain");
    assert_eq!(data["orchestration"]["failover_triggered"], false);
    assert!(result.fallback_providers_tried.is_empty());
}

#[tokio::test]
async fn test_exhaustion_is_bounded_by_max_retries() {
    let h = Harness::new("images", images(&["a", "b", "c", "d", "e"]), |a| {
        ["a", "b", "c", "d", "e"]
            .into_iter()
            .fold(a, |a, id| a.script(id, http_500()))
    });

    let result = h.engine.orchestrate(request("images", 2)).await;

    assert_eq!(result.status, OrchestrationStatus::Failed);
    assert_eq!(result.total_attempts, 2);
    assert_eq!(result.fallback_providers_tried, ["a", "b"]);
    assert_eq!(
        result.error_message.as_deref(),
        Some("all 2 providers failed for capability images")
    );
    assert_eq!(h.adapter.calls(), ["a", "b"]);
}

#[tokio::test]
async fn test_max_retries_above_candidates_never_repeats() {
    let h = Harness::new("images", images(&["a", "b"]), |a| {
        a.script("a", http_500()).script("b", http_500())
    });

    let result = h.engine.orchestrate(request("images", 10)).await;

    assert_eq!(result.total_attempts, 2);
    assert_eq!(h.adapter.calls(), ["a", "b"]);
}

#[tokio::test]
async fn test_rate_limit_consumes_one_slot() {
    let h = Harness::new("images", images(&["a", "b", "c"]), |a| {
        a.script(
            "a",
            Script::Fail(AttemptError::RateLimited {
                message: "quota".to_string(),
            }),
        )
        .script("b", http_500())
        .script("c", Script::Succeed(json!({})))
    });

    let result = h.engine.orchestrate(request("images", 2)).await;

    assert_eq!(result.status, OrchestrationStatus::Failed);
    assert_eq!(result.attempts[0].status, OrchestrationStatus::RateLimited);
    assert_eq!(h.adapter.calls(), ["a", "b"]);
}

#[tokio::test]
async fn test_no_candidates() {
    let h = Harness::new("images", vec![], |a| a);

    let result = h.engine.orchestrate(request("images", 3)).await;

    assert_eq!(result.status, OrchestrationStatus::Failed);
    assert_eq!(result.total_attempts, 0);
    assert_eq!(
        result.error_message.as_deref(),
        Some("no available providers for capability images")
    );
}

#[tokio::test]
async fn test_unknown_capability() {
    let h = Harness::new("images", images(&["a"]), |a| a);

    let result = h.engine.orchestrate(request("weather", 3)).await;

    assert_eq!(result.status, OrchestrationStatus::Failed);
    assert_eq!(result.total_attempts, 0);
    assert!(h.adapter.calls().is_empty());
}

#[tokio::test]
async fn test_missing_credentials_skip_without_consuming_slot() {
    let providers = vec![
        Provider::new("keyed", "Keyed", "images")
            .with_priority(1)
            .with_requires_key(true),
        Provider::new("free", "Free", "images").with_priority(2),
    ];
    let h = Harness::new("images", providers, |a| {
        a.script("keyed", Script::Succeed(json!({})))
            .script("free", Script::Succeed(json!({})))
    });

    let result = h.engine.orchestrate(request("images", 1)).await;

    assert_eq!(result.provider_used.as_deref(), Some("Free"));
    assert_eq!(result.total_attempts, 1);
    assert_eq!(result.skipped_providers.len(), 1);
    assert!(matches!(
        result.skipped_providers[0].reason,
        AttemptError::MissingCredentials { .. }
    ));
    assert_eq!(h.adapter.calls(), ["free"]);

    h.credentials.upsert("keyed", "api_key", "secret");
    let result = h.engine.orchestrate(request("images", 1)).await;
    assert_eq!(result.provider_used.as_deref(), Some("Keyed"));
}

#[tokio::test]
async fn test_blank_credential_is_skipped_like_a_missing_one() {
    let providers = vec![
        Provider::new("keyed", "Keyed", "images")
            .with_priority(1)
            .with_requires_key(true),
        Provider::new("free", "Free", "images").with_priority(2),
    ];
    let h = Harness::new("images", providers, |a| {
        a.script("keyed", Script::Succeed(json!({})))
            .script("free", Script::Succeed(json!({})))
    });
    h.credentials.upsert("keyed", "api_key", "");

    let view = h.admin.get_provider("keyed").await.unwrap();
    assert_eq!(view.status, ProviderStatus::MissingCredentials);

    let result = h.engine.orchestrate(request("images", 1)).await;

    assert_eq!(result.provider_used.as_deref(), Some("Free"));
    assert_eq!(h.adapter.calls(), ["free"]);
    assert!(matches!(
        result.skipped_providers[0].reason,
        AttemptError::MissingCredentials { .. }
    ));
    assert_eq!(h.repository.snapshot("keyed").health.recent_errors, 0);
}

#[tokio::test]
async fn test_rejected_payload_never_counts_against_providers() {
    let h = Harness::new("images", images(&["unsplash", "pixabay"]), |a| {
        let rejected = Script::Fail(AttemptError::invalid_payload("'query' is required"));
        a.script("unsplash", rejected.clone())
            .script("pixabay", rejected)
    });

    for _ in 0..5 {
        let result = h.engine.orchestrate(request("images", 5)).await;

        assert_eq!(result.status, OrchestrationStatus::Failed);
        assert_eq!(result.total_attempts, 1);
        assert!(result.is_caller_error());
        assert!(result.fallback_providers_tried.is_empty());
        assert!(
            result
                .error_message
                .as_deref()
                .is_some_and(|m| m.contains("'query' is required"))
        );
    }

    for id in ["unsplash", "pixabay"] {
        let stored = h.repository.snapshot(id);
        assert!(stored.enabled, "{id} stays enabled");
        assert_eq!(stored.health.recent_errors, 0);
        assert_eq!(stored.health.total_requests, 0);
    }
    assert_eq!(h.adapter.calls(), ["unsplash"; 5]);
}

#[tokio::test]
async fn test_zero_budget_makes_no_calls() {
    let h = Harness::new("images", images(&["u"]), |a| {
        a.script("u", Script::Succeed(json!({})))
    });

    let result = h.engine.orchestrate(request("images", 0)).await;

    assert_eq!(result.status, OrchestrationStatus::Failed);
    assert_eq!(result.total_attempts, 0);
    assert!(h.adapter.calls().is_empty());
    assert!(
        result
            .error_message
            .as_deref()
            .is_some_and(|m| m.contains("max_retries"))
    );
}

#[tokio::test]
async fn test_zero_timeout_is_rejected_before_any_call() {
    let h = Harness::new("images", images(&["u"]), |a| {
        a.script("u", Script::Succeed(json!({})))
    });
    let zero = OrchestrationRequest::new("images", Payload::new()).with_timeout(Duration::ZERO);

    let result = h.engine.orchestrate(zero).await;

    assert_eq!(result.total_attempts, 0);
    assert!(h.adapter.calls().is_empty());
    assert_eq!(h.repository.snapshot("u").health.total_requests, 0);
}

#[tokio::test]
async fn test_all_skipped_reports_no_providers() {
    let providers = vec![Provider::new("keyed", "Keyed", "images").with_requires_key(true)];
    let h = Harness::new("images", providers, |a| a);

    let result = h.engine.orchestrate(request("images", 3)).await;

    assert_eq!(result.total_attempts, 0);
    assert_eq!(
        result.error_message.as_deref(),
        Some("no available providers for capability images")
    );
}

#[tokio::test]
async fn test_category_policy_blocks_provider() {
    let providers = vec![
        Provider::new("gossip", "Gossip", "news")
            .with_priority(1)
            .with_category("tabloid"),
        Provider::new("wire", "Wire", "news").with_priority(2),
    ];
    let h = Harness::new("news", providers, |a| {
        a.script("gossip", Script::Succeed(json!({})))
            .script("wire", Script::Succeed(json!({})))
    });
    let mut policy = CategoryPolicy::default();
    policy.set("tabloid", false);
    h.policy.set(policy);

    let result = h.engine.orchestrate(request("news", 3)).await;

    assert_eq!(result.provider_used.as_deref(), Some("Wire"));
    assert!(matches!(
        result.skipped_providers[0].reason,
        AttemptError::PolicyBlocked { .. }
    ));
}

#[tokio::test]
async fn test_minute_limit_skips_provider() {
    let capped = Provider::new("capped", "Capped", "images")
        .with_priority(1)
        .with_rate_limits(RateLimits {
            per_minute: Some(1),
            per_hour: None,
            per_day: None,
        });
    let providers = vec![capped, Provider::new("other", "Other", "images").with_priority(2)];
    let h = Harness::new("images", providers, |a| {
        a.script("capped", Script::Succeed(json!({})))
            .script("other", Script::Succeed(json!({})))
    });

    let first = h.engine.orchestrate(request("images", 1)).await;
    let second = h.engine.orchestrate(request("images", 1)).await;

    assert_eq!(first.provider_used.as_deref(), Some("Capped"));
    assert_eq!(second.provider_used.as_deref(), Some("Other"));
    assert!(matches!(
        second.skipped_providers[0].reason,
        AttemptError::WindowLimitReached { .. }
    ));
}

#[tokio::test]
async fn test_repeated_failures_trip_breaker_for_later_requests() {
    let mut flaky = Provider::new("flaky", "Flaky", "images").with_priority(1);
    flaky.health.recent_errors = 4;
    let providers = vec![flaky, Provider::new("steady", "Steady", "images").with_priority(2)];
    let h = Harness::new("images", providers, |a| {
        a.script("flaky", http_500())
            .script("steady", Script::Succeed(json!({})))
    });

    let first = h.engine.orchestrate(request("images", 3)).await;
    assert_eq!(first.fallback_providers_tried, ["Flaky"]);
    assert!(!h.repository.snapshot("flaky").enabled);

    let second = h.engine.orchestrate(request("images", 3)).await;
    assert_eq!(second.total_attempts, 1);
    assert!(second.fallback_providers_tried.is_empty());
    assert_eq!(h.adapter.calls(), ["flaky", "steady", "steady"]);
}

#[tokio::test]
async fn test_avatar_primary_failure_falls_back() {
    let providers = vec![
        Provider::new("did", "D-ID", "avatar-generation").with_priority(1),
        Provider::new("heygen", "HeyGen", "avatar-generation").with_priority(2),
    ];
    let h = Harness::new("avatar-generation", providers, |a| {
        a.script("did", http_500())
            .script("heygen", Script::Succeed(json!({"video_url": "https://v"})))
    });

    let result = h.engine.orchestrate(request("avatar-generation", 2)).await;

    assert_eq!(result.provider_used.as_deref(), Some("HeyGen"));
    assert_eq!(result.fallback_providers_tried, ["D-ID"]);
}
