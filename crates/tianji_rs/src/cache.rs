//! Memoizing result cache.
//!
//! Entries are keyed by content hash and expire after a fixed TTL. Reads and
//! writes go through a `DashMap`; two threads missing on the same key may
//! both compute, and the later insert wins. Statistics use atomic counters.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use dashmap::DashMap;
use serde::Serialize;

struct CacheEntry<V> {
    inserted_at: Instant,
    value: Arc<V>,
}

/// Snapshot of cache counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    /// Times the compute closure ran.
    pub computations: u64,
    /// Entries dropped for expiry.
    pub evictions: u64,
    pub entries: usize,
}

impl CacheStats {
    /// Hit ratio in [0, 1].
    pub fn hit_ratio(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// A TTL cache of shared results.
pub struct ResultCache<V> {
    entries: DashMap<String, CacheEntry<V>>,
    ttl: Duration,
    enabled: bool,
    hits: AtomicU64,
    misses: AtomicU64,
    computations: AtomicU64,
    evictions: AtomicU64,
}

impl<V> ResultCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
            enabled: true,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            computations: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }

    /// A cache that never stores anything; every lookup computes.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::new(Duration::ZERO)
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Fresh entry for `key`, dropping it if expired.
    pub fn get(&self, key: &str) -> Option<Arc<V>> {
        let found = self
            .entries
            .get(key)
            .map(|e| (e.inserted_at, Arc::clone(&e.value)));
        match found {
            Some((at, value)) if at.elapsed() < self.ttl => Some(value),
            Some(_) => {
                let ttl = self.ttl;
                if self
                    .entries
                    .remove_if(key, |_, e| e.inserted_at.elapsed() >= ttl)
                    .is_some()
                {
                    self.evictions.fetch_add(1, Ordering::Relaxed);
                }
                None
            }
            None => None,
        }
    }

    pub fn insert(&self, key: String, value: Arc<V>) {
        if !self.enabled {
            return;
        }
        self.entries.insert(
            key,
            CacheEntry {
                inserted_at: Instant::now(),
                value,
            },
        );
    }

    /// Return the cached value for `key` or run `compute` and store its result.
    /// Errors are returned and never cached.
    pub fn get_or_try_insert_with<E>(
        &self,
        key: &str,
        compute: impl FnOnce() -> Result<V, E>,
    ) -> Result<Arc<V>, E> {
        if self.enabled {
            if let Some(value) = self.get(key) {
                self.hits.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(key = %short(key), "cache hit");
                return Ok(value);
            }
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(key = %short(key), enabled = self.enabled, "cache miss");

        let value = Arc::new(compute()?);
        self.computations.fetch_add(1, Ordering::Relaxed);
        self.insert(key.to_string(), Arc::clone(&value));
        Ok(value)
    }

    /// Drop every expired entry. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let before = self.entries.len();
        let ttl = self.ttl;
        self.entries.retain(|_, e| e.inserted_at.elapsed() < ttl);
        let removed = before.saturating_sub(self.entries.len());
        self.evictions.fetch_add(removed as u64, Ordering::Relaxed);
        removed
    }

    /// Remove all entries. Counters are kept.
    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            computations: self.computations.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            entries: self.entries.len(),
        }
    }
}

fn short(key: &str) -> &str {
    key.get(..12).unwrap_or(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    fn compute(n: u32) -> impl FnOnce() -> Result<u32, Infallible> {
        move || Ok(n)
    }

    #[test]
    fn second_lookup_hits() {
        let cache = ResultCache::new(Duration::from_secs(60));
        assert_eq!(*cache.get_or_try_insert_with("a", compute(1)).unwrap(), 1);
        assert_eq!(*cache.get_or_try_insert_with("a", compute(2)).unwrap(), 1);
        let stats = cache.stats();
        assert_eq!((stats.hits, stats.misses, stats.computations), (1, 1, 1));
        assert_eq!(stats.entries, 1);
        assert!((stats.hit_ratio() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn zero_ttl_expires_immediately() {
        let cache = ResultCache::new(Duration::ZERO);
        cache.get_or_try_insert_with("a", compute(1)).unwrap();
        assert_eq!(*cache.get_or_try_insert_with("a", compute(2)).unwrap(), 2);
        let stats = cache.stats();
        assert_eq!(stats.computations, 2);
        assert_eq!(stats.evictions, 1);
    }

    #[test]
    fn purge_and_clear() {
        let cache = ResultCache::new(Duration::ZERO);
        cache.insert("a".into(), Arc::new(1));
        cache.insert("b".into(), Arc::new(2));
        assert_eq!(cache.purge_expired(), 2);
        assert!(cache.is_empty());

        let cache = ResultCache::new(Duration::from_secs(60));
        cache.insert("a".into(), Arc::new(1));
        cache.clear();
        assert!(cache.get("a").is_none());
    }

    #[test]
    fn errors_are_not_cached() {
        let cache: ResultCache<u32> = ResultCache::new(Duration::from_secs(60));
        let err: Result<_, &str> = cache.get_or_try_insert_with("a", || Err("boom"));
        assert!(err.is_err());
        assert!(cache.is_empty());
        assert_eq!(cache.stats().computations, 0);
    }

    #[test]
    fn disabled_cache_always_computes() {
        let cache = ResultCache::disabled();
        cache.get_or_try_insert_with("a", compute(1)).unwrap();
        cache.get_or_try_insert_with("a", compute(1)).unwrap();
        assert_eq!(cache.stats().computations, 2);
        assert!(cache.is_empty());
    }
}
