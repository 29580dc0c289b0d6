//! Time-based cache with TTL expiry.
//!
//! Backs the per-user conversation contexts: entries fall out after the
//! configured TTL instead of accumulating in an unbounded process-wide
//! map.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    inserted_at: Instant,
}

/// A thread-safe cache whose entries expire after a fixed TTL.
///
/// Cloning is cheap (shared `Arc` internally); clones observe the same
/// entries.
#[derive(Clone)]
pub struct TimedCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    entries: Arc<RwLock<HashMap<K, CacheEntry<V>>>>,
    ttl: Duration,
}

impl<K, V> TimedCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Create a cache with the given TTL in seconds.
    pub fn new(ttl_seconds: u64) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            ttl: Duration::from_secs(ttl_seconds),
        }
    }

    /// Insert a value, replacing any previous entry and resetting its age.
    pub fn insert(&self, key: K, value: V) {
        let entry = CacheEntry {
            value,
            inserted_at: Instant::now(),
        };
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(key, entry);
        }
    }

    /// Get a value if present and not yet expired.
    pub fn get(&self, key: &K) -> Option<V> {
        let now = Instant::now();
        if let Ok(entries) = self.entries.read() {
            if let Some(entry) = entries.get(key) {
                if now.duration_since(entry.inserted_at) < self.ttl {
                    return Some(entry.value.clone());
                }
            }
        }
        None
    }

    /// Mutate the value for `key` under the write lock, inserting a
    /// fresh one first when the entry is absent or expired. Returns a
    /// clone of the updated value; the entry's age is reset.
    ///
    /// Because the read-modify-write happens under one lock, concurrent
    /// updates for the same key never lose each other's mutations.
    pub fn update<F>(&self, key: K, default: impl FnOnce() -> V, apply: F) -> V
    where
        F: FnOnce(&mut V),
    {
        let now = Instant::now();
        if let Ok(mut entries) = self.entries.write() {
            let stale = entries
                .get(&key)
                .map_or(true, |e| now.duration_since(e.inserted_at) >= self.ttl);
            if stale {
                entries.insert(
                    key.clone(),
                    CacheEntry {
                        value: default(),
                        inserted_at: now,
                    },
                );
            }
            let entry = entries.get_mut(&key).expect("entry present after insert");
            apply(&mut entry.value);
            entry.inserted_at = now;
            return entry.value.clone();
        }

        // Poisoned lock: apply to a detached value so callers still get
        // a coherent result.
        let mut value = default();
        apply(&mut value);
        value
    }

    /// Remove a specific key.
    pub fn remove(&self, key: &K) {
        if let Ok(mut entries) = self.entries.write() {
            entries.remove(key);
        }
    }

    /// Drop every expired entry. Called opportunistically by callers
    /// that hold the cache long-term.
    pub fn purge_expired(&self) {
        let now = Instant::now();
        if let Ok(mut entries) = self.entries.write() {
            entries.retain(|_, entry| now.duration_since(entry.inserted_at) < self.ttl);
        }
    }

    /// Number of entries, including any not yet purged after expiry.
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
