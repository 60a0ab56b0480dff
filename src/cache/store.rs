//! Response cache store
//!
//! Thread-safe container for cached payloads and their expiry metadata.
//! Reads answer from validity at call time: an expired entry is never
//! returned even while it is still physically present, so the periodic
//! sweep can lag behind without ever serving stale data.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use dashmap::DashMap;
use serde_json::Value;

use crate::clock::Clock;

/// A cached payload with TTL metadata
#[derive(Debug, Clone)]
struct CacheEntry {
    payload: Value,
    #[allow(dead_code)]
    stored_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl CacheEntry {
    fn is_valid(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// Cache statistics tracked atomically
#[derive(Debug, Default)]
struct CacheStats {
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

/// Snapshot of cache statistics
#[derive(Debug, Clone, serde::Serialize)]
pub struct CacheStatsSnapshot {
    /// Reads served from cache
    pub hits: u64,
    /// Reads that found nothing valid
    pub misses: u64,
    /// Entries removed by expiry sweeps
    pub evictions: u64,
    /// Entries currently held, valid or not
    pub size: usize,
}

/// Thread-safe response cache with TTL expiry
///
/// The store exclusively owns its entries; callers only ever receive clones
/// of the payloads. Time comes from the injected [`Clock`].
pub struct CacheStore {
    entries: DashMap<String, CacheEntry>,
    clock: Arc<dyn Clock>,
    stats: CacheStats,
}

impl CacheStore {
    /// Create an empty store reading time from `clock`
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: DashMap::new(),
            clock,
            stats: CacheStats::default(),
        }
    }

    /// Whether a non-expired entry exists for `key`
    pub fn is_valid(&self, key: &str) -> bool {
        let now = self.clock.now();
        self.entries
            .get(key)
            .is_some_and(|entry| entry.is_valid(now))
    }

    /// Payload for `key` if present and not expired
    ///
    /// Expired entries are left in place for the sweep; a get never mutates
    /// the map.
    pub fn get(&self, key: &str) -> Option<Value> {
        let now = self.clock.now();
        let payload = self
            .entries
            .get(key)
            .filter(|entry| entry.is_valid(now))
            .map(|entry| entry.payload.clone());

        if payload.is_some() {
            self.stats.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.stats.misses.fetch_add(1, Ordering::Relaxed);
        }
        payload
    }

    /// Insert or overwrite the entry for `key` with the given TTL
    pub fn put(&self, key: &str, payload: Value, ttl: Duration) {
        let now = self.clock.now();
        let ttl = TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX);
        let expires_at = now.checked_add_signed(ttl).unwrap_or(DateTime::<Utc>::MAX_UTC);

        self.entries.insert(
            key.to_string(),
            CacheEntry {
                payload,
                stored_at: now,
                expires_at,
            },
        );
    }

    /// Remove one entry
    pub fn delete_key(&self, key: &str) {
        self.entries.remove(key);
    }

    /// Remove every entry whose key starts with `prefix`
    ///
    /// Plain string-prefix match: a mutation on `services` also drops
    /// `services/42` and `services?page=1`, the whole resource family that
    /// shares the path prefix.
    pub fn delete_by_prefix(&self, prefix: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| !key.starts_with(prefix));
        before.saturating_sub(self.entries.len())
    }

    /// Remove every entry that expired before now
    ///
    /// Safe to run from a timer: concurrent gets already refuse expired
    /// entries, so the sweep only reclaims memory.
    pub fn sweep_expired(&self) -> usize {
        let now = self.clock.now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.expires_at >= now);
        let removed = before.saturating_sub(self.entries.len());

        if removed > 0 {
            self.stats
                .evictions
                .fetch_add(removed as u64, Ordering::Relaxed);
        }
        removed
    }

    /// Drop every entry
    pub fn clear_all(&self) {
        self.entries.clear();
    }

    /// Number of entries physically present (valid or expired)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current statistics
    pub fn stats(&self) -> CacheStatsSnapshot {
        CacheStatsSnapshot {
            hits: self.stats.hits.load(Ordering::Relaxed),
            misses: self.stats.misses.load(Ordering::Relaxed),
            evictions: self.stats.evictions.load(Ordering::Relaxed),
            size: self.entries.len(),
        }
    }
}
