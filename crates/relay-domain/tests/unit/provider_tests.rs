//! Unit tests for the provider entity

use chrono::{TimeZone, Utc};
use relay_domain::entities::{HealthStatus, Provider, RateLimits, UsageWindow};

fn at(h: u32, m: u32, s: u32) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, h, m, s).unwrap()
}

#[test]
fn test_new_provider_defaults() {
    let p = Provider::new("unsplash", "Unsplash", "images");

    assert!(p.enabled);
    assert!(p.auto_disable);
    assert!(!p.requires_key);
    assert_eq!(p.priority, 1);
    assert_eq!(p.health.status, HealthStatus::Unknown);
    assert_eq!(p.health.recent_errors, 0);
    assert!(!p.has_day_limit());
}

#[test]
fn test_load_factor_without_day_limit_is_zero() {
    let mut p = Provider::new("a", "A", "images");
    p.usage.increment(at(10, 0, 0));

    assert!(p.load_factor(at(10, 0, 1)).abs() < f64::EPSILON);
}

#[test]
fn test_load_factor_with_day_limit() {
    let mut p = Provider::new("a", "A", "images").with_day_limit(10);
    for _ in 0..2 {
        p.usage.increment(at(10, 0, 0));
    }

    assert!((p.load_factor(at(11, 0, 0)) - 0.2).abs() < 1e-9);
}

#[test]
fn test_zero_day_limit_is_fully_loaded() {
    let p = Provider::new("a", "A", "images").with_day_limit(0);

    assert!((p.load_factor(at(10, 0, 0)) - 1.0).abs() < f64::EPSILON);
    assert!(!p.is_within_limit(UsageWindow::Day, at(10, 0, 0)));
}

#[test]
fn test_minute_window_rolls_over() {
    let mut p = Provider::new("a", "A", "images");
    p.usage.increment(at(10, 0, 5));
    p.usage.increment(at(10, 0, 59));

    assert_eq!(p.usage_in(UsageWindow::Minute, at(10, 0, 59)), 2);
    assert_eq!(p.usage_in(UsageWindow::Minute, at(10, 1, 0)), 0);
    assert_eq!(p.usage_in(UsageWindow::Hour, at(10, 1, 0)), 2);

    p.usage.increment(at(10, 1, 0));
    assert_eq!(p.usage.minute.count, 1);
    assert_eq!(p.usage.hour.count, 3);
    assert_eq!(p.usage.day.count, 3);
}

#[test]
fn test_day_window_resets_at_utc_midnight() {
    let mut p = Provider::new("a", "A", "images").with_day_limit(1);
    p.usage.increment(at(23, 59, 59));
    assert!(!p.is_within_limit(UsageWindow::Day, at(23, 59, 59)));

    let next_day = Utc.with_ymd_and_hms(2026, 3, 15, 0, 0, 0).unwrap();
    assert!(p.is_within_limit(UsageWindow::Day, next_day));
    assert!(p.load_factor(next_day).abs() < f64::EPSILON);
}

#[test]
fn test_is_within_limit_per_window() {
    let mut p = Provider::new("a", "A", "images").with_rate_limits(RateLimits {
        per_minute: Some(1),
        per_hour: None,
        per_day: Some(100),
    });
    let now = at(9, 30, 0);
    assert!(p.is_within_limit(UsageWindow::Minute, now));

    p.usage.increment(now);
    assert!(!p.is_within_limit(UsageWindow::Minute, now));
    assert!(p.is_within_limit(UsageWindow::Hour, now));
    assert!(p.is_within_limit(UsageWindow::Day, now));
}

#[test]
fn test_health_status_parse_and_display() {
    assert_eq!("Unhealthy".parse::<HealthStatus>().unwrap(), HealthStatus::Unhealthy);
    assert_eq!(HealthStatus::Degraded.to_string(), "degraded");
    assert!("sick".parse::<HealthStatus>().is_err());
}

#[test]
fn test_provider_serialization() {
    let p = Provider::new("newsapi", "NewsAPI", "news")
        .with_priority(2)
        .with_category("news")
        .with_configuration(serde_json::json!({"base_url": "https://newsapi.org/v2"}));
    let json = serde_json::to_string(&p).expect("serialization should succeed");
    let back: Provider = serde_json::from_str(&json).expect("deserialization should succeed");

    assert_eq!(p, back);
    assert!(json.contains("\"status\":\"unknown\""));
}
