//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with LRU tracking and TTL expiration.

use std::collections::HashMap;
use std::time::Duration;

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::cache::{CacheEntry, CacheStats, Clock, LruTracker, SystemClock};

// == Store State ==
/// Entries and their recency order, always mutated together under one lock.
#[derive(Debug)]
struct StoreState<T> {
    entries: HashMap<String, CacheEntry<T>>,
    lru: LruTracker,
}

impl<T> StoreState<T> {
    fn remove(&mut self, key: &str) -> bool {
        self.lru.remove(key);
        self.entries.remove(key).is_some()
    }
}

// == TTL LRU Cache ==
/// Capacity-bounded, self-expiring, recency-ordered cache keyed by string.
///
/// - `put` evicts the least recently used entry before an insert would
///   exceed `max_size`.
/// - `get` treats entries older than `ttl` as absent and drops them; there
///   is no background expiry here (see [`TtlLruCache::purge_expired`]).
/// - Reads bump recency but never refresh the expiry clock.
///
/// All operations take `&self`; state is guarded by a per-instance mutex.
#[derive(Debug)]
pub struct TtlLruCache<T, C = SystemClock> {
    state: Mutex<StoreState<T>>,
    max_size: usize,
    ttl: Duration,
    clock: C,
}

impl<T: Clone> TtlLruCache<T, SystemClock> {
    // == Constructor ==
    /// Creates a cache backed by the system clock.
    ///
    /// A `max_size` of zero is treated as one.
    pub fn new(max_size: usize, ttl: Duration) -> Self {
        Self::with_clock(max_size, ttl, SystemClock)
    }
}

impl<T: Clone, C: Clock> TtlLruCache<T, C> {
    /// Creates a cache that reads time from `clock`.
    pub fn with_clock(max_size: usize, ttl: Duration, clock: C) -> Self {
        Self {
            state: Mutex::new(StoreState {
                entries: HashMap::new(),
                lru: LruTracker::new(),
            }),
            max_size: max_size.max(1),
            ttl,
            clock,
        }
    }

    // == Put ==
    /// Stores `value` under `key`, replacing any previous entry.
    ///
    /// The entry is stamped with the current time and becomes most recently
    /// used. Inserting a new key into a full cache evicts the least
    /// recently used entry first, whether or not that entry has expired.
    pub fn put(&self, key: impl Into<String>, value: T) {
        let key = key.into();
        let now = self.clock.now();
        let mut state = self.state.lock();

        if !state.entries.contains_key(&key) {
            while state.entries.len() >= self.max_size {
                let Some(evicted) = state.lru.evict_oldest() else {
                    break;
                };
                state.entries.remove(&evicted);
                debug!(
                    key = %evicted,
                    max_size = self.max_size,
                    "Evicted least recently used entry"
                );
            }
        }

        state.entries.insert(key.clone(), CacheEntry::new(value, now));
        state.lru.touch(&key);
    }

    // == Get ==
    /// Retrieves a copy of the value stored under `key`.
    ///
    /// Returns None if the key was never cached, was removed, or has
    /// expired; the three cases are indistinguishable to the caller.
    pub fn get(&self, key: &str) -> Option<T> {
        let now = self.clock.now();
        let mut state = self.state.lock();

        let expired = match state.entries.get(key) {
            Some(entry) => entry.is_expired(now, self.ttl),
            None => {
                trace!(key = %key, "Cache miss");
                return None;
            }
        };

        if expired {
            state.remove(key);
            debug!(key = %key, "Dropped expired entry on access");
            return None;
        }

        state.lru.touch(key);
        trace!(key = %key, "Cache hit");
        state.entries.get(key).map(|entry| entry.value.clone())
    }

    // == Invalidate ==
    /// Removes `key`. No-op if absent.
    pub fn invalidate(&self, key: &str) {
        if self.state.lock().remove(key) {
            debug!(key = %key, "Invalidated entry");
        }
    }

    // == Invalidate Where ==
    /// Removes every entry whose payload matches `predicate`.
    ///
    /// Scans all held entries, expired ones included. Returns the number of
    /// entries removed.
    pub fn invalidate_where<F>(&self, mut predicate: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        let mut state = self.state.lock();
        let matching: Vec<String> = state
            .entries
            .iter()
            .filter(|(_, entry)| predicate(&entry.value))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &matching {
            state.remove(key);
        }
        matching.len()
    }

    // == Clear ==
    /// Removes every entry.
    pub fn clear(&self) {
        let mut state = self.state.lock();
        state.entries.clear();
        state.lru.clear();
    }

    // == Preload ==
    /// Stores each pair in sequence, exactly as repeated [`put`](Self::put) calls.
    pub fn preload<I, K>(&self, values: I)
    where
        I: IntoIterator<Item = (K, T)>,
        K: Into<String>,
    {
        for (key, value) in values {
            self.put(key, value);
        }
    }

    // == Purge Expired ==
    /// Removes all entries older than `ttl`.
    ///
    /// Never called by `get` or `put`; only by an explicitly scheduled sweep.
    /// Returns the number of entries removed.
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let ttl = self.ttl;
        let mut state = self.state.lock();
        let expired: Vec<String> = state
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(now, ttl))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            state.remove(key);
        }
        expired.len()
    }

    // == Stats ==
    /// Returns the current size and configured bound.
    pub fn stats(&self) -> CacheStats {
        CacheStats::new(self.len(), self.max_size)
    }

    // == Length ==
    /// Number of held entries, expired-but-unobserved ones included.
    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.state.lock().entries.is_empty()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}
