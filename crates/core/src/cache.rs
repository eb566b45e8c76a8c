//! Day-bucketed in-memory cache of scraped company profiles.
//!
//! Profiles are keyed by `{domain}_{day_bucket}`, so a domain scraped once is
//! served from memory for the rest of that calendar day and scraped afresh the
//! next. There is no capacity bound; `sweep` runs after every request and
//! keeps the map to at most two buckets per domain.
//!
//! Concurrent requests for the same key before the first scrape completes may
//! both scrape; the mutex only guards the map, not the work that fills it.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};

use crate::profile::CompanyProfile;

/// Seconds per day-bucket.
const BUCKET_SECONDS: i64 = 24 * 3600;

/// Integer identifying a calendar day, used to expire cached profiles.
pub fn day_bucket(now: DateTime<Utc>) -> i64 {
    now.timestamp().div_euclid(BUCKET_SECONDS)
}

/// Cache key for a domain within a day-bucket.
pub fn cache_key(domain: &str, bucket: i64) -> String {
    format!("{domain}_{bucket}")
}

/// Process-wide profile cache, constructed once and handed to request
/// handlers by reference.
#[derive(Debug, Default)]
pub struct ProfileCache {
    entries: Mutex<HashMap<String, CompanyProfile>>,
}

impl ProfileCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a profile snapshot by cache key.
    pub fn get(&self, key: &str) -> Option<CompanyProfile> {
        self.lock().get(key).cloned()
    }

    /// Store a profile snapshot under the given key.
    pub fn insert(&self, key: String, profile: CompanyProfile) {
        self.lock().insert(key, profile);
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Remove entries whose day-bucket is more than one day away from
    /// `current_bucket`, plus any key whose bucket suffix fails to parse.
    ///
    /// Runs best-effort after each request; it must never panic or block the
    /// request it is attached to. Returns the number of entries removed.
    pub fn sweep(&self, current_bucket: i64) -> usize {
        let mut entries = self.lock();
        let before = entries.len();

        entries.retain(|key, _| match parse_bucket(key) {
            Some(bucket) => (current_bucket - bucket).abs() <= 1,
            None => false,
        });

        let removed = before - entries.len();
        if removed > 0 {
            tracing::info!(removed, remaining = entries.len(), "swept stale cache entries");
        }
        removed
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, CompanyProfile>> {
        // A panic while holding the lock leaves the map intact; keep serving.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Parse the trailing day-bucket integer out of a cache key.
fn parse_bucket(key: &str) -> Option<i64> {
    let (_, suffix) = key.rsplit_once('_')?;
    suffix.parse().ok()
}
