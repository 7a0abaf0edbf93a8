//! Caller-owned cache of computed snapshots.
//!
//! A snapshot is reused only while the evaluation instant stays within `ttl`
//! of the instant it was computed for. Owners call `invalidate` after they
//! record new entries for a driver.

use crate::errors::{AppError, AppResult};
use crate::models::hos_status::DriverHosStatus;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;

/// Longest TTL a cache accepts.
pub const MAX_TTL_SECS: u64 = 24 * 60 * 60;

pub fn ttl_from_secs(secs: u64) -> AppResult<Duration> {
    let out_of_range = || {
        AppError::Config(format!(
            "status_cache_ttl_secs must be at most {MAX_TTL_SECS} (found {secs})"
        ))
    };
    if secs > MAX_TTL_SECS {
        return Err(out_of_range());
    }
    i64::try_from(secs)
        .ok()
        .and_then(Duration::try_seconds)
        .ok_or_else(out_of_range)
}

#[derive(Debug)]
pub struct HosStatusCache {
    ttl: Duration,
    entries: HashMap<String, DriverHosStatus>,
    hits: u64,
    misses: u64,
}

impl HosStatusCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }

    pub fn with_ttl_secs(secs: u64) -> AppResult<Self> {
        Ok(Self::new(ttl_from_secs(secs)?))
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Fresh snapshot for `driver_id` at `now`, evicting it when stale.
    pub fn get(&mut self, driver_id: &str, now: DateTime<Utc>) -> Option<DriverHosStatus> {
        let fresh = match self.entries.get(driver_id) {
            Some(status) => {
                let age = now - status.evaluated_at;
                age >= Duration::zero() && age < self.ttl
            }
            None => {
                self.misses += 1;
                return None;
            }
        };

        if fresh {
            self.hits += 1;
            self.entries.get(driver_id).cloned()
        } else {
            self.entries.remove(driver_id);
            self.misses += 1;
            None
        }
    }

    pub fn insert(&mut self, status: DriverHosStatus) {
        self.entries.insert(status.driver_id.clone(), status);
    }

    pub fn get_or_compute<F>(
        &mut self,
        driver_id: &str,
        now: DateTime<Utc>,
        compute: F,
    ) -> AppResult<DriverHosStatus>
    where
        F: FnOnce() -> AppResult<DriverHosStatus>,
    {
        if let Some(status) = self.get(driver_id, now) {
            return Ok(status);
        }

        let status = compute()?;
        self.insert(status.clone());
        Ok(status)
    }

    pub fn invalidate(&mut self, driver_id: &str) -> bool {
        self.entries.remove(driver_id).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}
