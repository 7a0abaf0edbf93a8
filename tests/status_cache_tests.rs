use chrono::Duration;
use hoslog::models::duty_status::DutyStatus::Driving;
use hoslog::errors::AppError;
use hoslog::models::hos_status::DriverHosStatus;
use hoslog::{HosRules, HosStatusCache, calculate_hos_status};

mod common;
use common::{DRIVER, entry, logs, ts};

fn snapshot(at: &str) -> DriverHosStatus {
    let data = logs(vec![entry(Driving, "2025-06-10T06:00:00Z", "2025-06-10T08:00:00Z")]);
    calculate_hos_status(DRIVER, &data, &ts(at), &HosRules::default())
}

#[test]
fn fresh_snapshot_is_served_from_cache() {
    let mut cache = HosStatusCache::with_ttl_secs(60).expect("valid ttl");
    cache.insert(snapshot("2025-06-10T12:00:00Z"));

    let hit = cache.get(DRIVER, ts("2025-06-10T12:00:30Z"));
    assert!(hit.is_some());
    assert_eq!(cache.hits(), 1);
    assert_eq!(cache.misses(), 0);
}

#[test]
fn stale_snapshot_is_evicted() {
    let mut cache = HosStatusCache::new(Duration::seconds(60));
    cache.insert(snapshot("2025-06-10T12:00:00Z"));

    assert!(cache.get(DRIVER, ts("2025-06-10T12:01:00Z")).is_none());
    assert!(cache.is_empty());
    assert_eq!(cache.misses(), 1);
}

#[test]
fn snapshot_from_the_future_is_not_reused() {
    let mut cache = HosStatusCache::with_ttl_secs(3600).expect("valid ttl");
    cache.insert(snapshot("2025-06-10T12:00:00Z"));

    assert!(cache.get(DRIVER, ts("2025-06-10T11:59:00Z")).is_none());
}

#[test]
fn get_or_compute_only_computes_on_miss() {
    let mut cache = HosStatusCache::with_ttl_secs(60).expect("valid ttl");
    let mut computed = 0;

    for at in ["2025-06-10T12:00:00Z", "2025-06-10T12:00:10Z", "2025-06-10T12:00:20Z"] {
        let status = cache
            .get_or_compute(DRIVER, ts(at), || {
                computed += 1;
                Ok(snapshot(at))
            })
            .expect("computed");
        assert_eq!(status.used_drive_time, 120);
    }

    assert_eq!(computed, 1);
    assert_eq!(cache.hits(), 2);
    assert_eq!(cache.misses(), 1);
}

#[test]
fn invalidate_forces_a_recompute() {
    let mut cache = HosStatusCache::with_ttl_secs(60).expect("valid ttl");
    cache.insert(snapshot("2025-06-10T12:00:00Z"));

    assert!(cache.invalidate(DRIVER));
    assert!(!cache.invalidate(DRIVER));
    assert!(cache.get(DRIVER, ts("2025-06-10T12:00:05Z")).is_none());
}

#[test]
fn zero_ttl_never_hits() {
    let mut cache = HosStatusCache::with_ttl_secs(0).expect("valid ttl");
    cache.insert(snapshot("2025-06-10T12:00:00Z"));

    assert!(cache.get(DRIVER, ts("2025-06-10T12:00:00Z")).is_none());
    assert_eq!(cache.ttl(), Duration::zero());
}

#[test]
fn out_of_range_ttl_is_rejected() {
    assert!(matches!(
        HosStatusCache::with_ttl_secs(u64::MAX),
        Err(AppError::Config(_))
    ));
    assert!(matches!(
        HosStatusCache::with_ttl_secs(10_000_000_000_000_000),
        Err(AppError::Config(_))
    ));

    let cache = HosStatusCache::with_ttl_secs(86_400).expect("one day is allowed");
    assert_eq!(cache.ttl(), Duration::days(1));
}
