//! In-memory repository semantics under concurrency

use std::sync::Arc;

use relay_domain::entities::{HealthStatus, Provider};
use relay_domain::ports::ProviderRepository;
use relay_infrastructure::repository::InMemoryProviderRepository;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_updates_of_one_provider_are_not_lost() {
    let repo = Arc::new(InMemoryProviderRepository::new());
    repo.upsert(Provider::new("p", "P", "images")).await.unwrap();

    let handles: Vec<_> = (0..100)
        .map(|_| {
            let repo = Arc::clone(&repo);
            tokio::spawn(async move {
                repo.update(
                    "p",
                    Box::new(|p: &mut Provider| p.health.total_requests += 1),
                )
                .await
                .unwrap()
            })
        })
        .collect();

    let mut befores = Vec::new();
    for handle in handles {
        befores.push(handle.await.unwrap().before.health.total_requests);
    }
    befores.sort_unstable();
    befores.dedup();

    assert_eq!(befores.len(), 100, "two updates observed the same state");
    let stored = repo.get("p").await.unwrap().unwrap();
    assert_eq!(stored.health.total_requests, 100);
}

#[tokio::test]
async fn upsert_replaces_policy_fields_but_keeps_usage_and_order() {
    let repo = InMemoryProviderRepository::new();
    repo.upsert(Provider::new("a", "A", "news")).await.unwrap();
    repo.upsert(Provider::new("b", "B", "news")).await.unwrap();
    repo.update(
        "a",
        Box::new(|p: &mut Provider| {
            p.health.total_requests = 7;
            p.health.status = HealthStatus::Degraded;
        }),
    )
    .await
    .unwrap();

    let stored = repo
        .upsert(Provider::new("a", "A renamed", "news").with_priority(4))
        .await
        .unwrap();

    assert_eq!(stored.name, "A renamed");
    assert_eq!(stored.priority, 4);
    assert_eq!(stored.health.total_requests, 7);
    assert_eq!(stored.health.status, HealthStatus::Degraded);

    let ids: Vec<_> = repo
        .list("news")
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(ids, ["a", "b"]);
}

#[tokio::test]
async fn upsert_does_not_reenable_a_tripped_provider() {
    let repo = InMemoryProviderRepository::new();
    repo.upsert(Provider::new("a", "A", "news")).await.unwrap();
    repo.update(
        "a",
        Box::new(|p: &mut Provider| {
            p.enabled = false;
            p.health.recent_errors = 5;
        }),
    )
    .await
    .unwrap();

    let stored = repo
        .upsert(Provider::new("a", "A", "news").with_priority(2))
        .await
        .unwrap();

    assert!(!stored.enabled);
    assert_eq!(stored.priority, 2);
    assert_eq!(stored.health.recent_errors, 5);
}

#[tokio::test]
async fn defaults_are_per_capability() {
    let repo = InMemoryProviderRepository::new();
    repo.upsert(Provider::new("a", "A", "news")).await.unwrap();
    repo.upsert(Provider::new("b", "B", "news")).await.unwrap();

    assert_eq!(repo.default_for("news").await.unwrap(), None);
    assert_eq!(repo.set_default("news", "a").await.unwrap(), None);
    assert_eq!(
        repo.set_default("news", "b").await.unwrap().as_deref(),
        Some("a")
    );
    assert_eq!(repo.default_for("news").await.unwrap().as_deref(), Some("b"));
    assert!(repo.set_default("news", "ghost").await.is_err());
}
