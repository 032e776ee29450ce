//! Cache Statistics Module
//!
//! Point-in-time size snapshots for monitoring and logging.

use serde::Serialize;

// == Cache Stats ==
/// Size and bound of a single collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Entries currently held, including expired ones not yet observed
    pub size: usize,
    /// Configured capacity
    pub max_size: usize,
}

impl CacheStats {
    // == Constructor ==
    pub fn new(size: usize, max_size: usize) -> Self {
        Self { size, max_size }
    }

    // == Utilization ==
    /// Fraction of capacity in use, or 0.0 for a zero capacity.
    pub fn utilization(&self) -> f64 {
        if self.max_size == 0 {
            0.0
        } else {
            self.size as f64 / self.max_size as f64
        }
    }

    // == Is Full ==
    /// True when the next insert of a new key will evict.
    pub fn is_full(&self) -> bool {
        self.size >= self.max_size
    }
}

// == Snapshot ==
/// Read-only view over all profile collections.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheStatsSnapshot {
    pub profiles: CacheStats,
    pub posts: CacheStats,
    pub profile_stats: CacheStats,
    /// Shared expiry duration in whole minutes
    pub expiry_minutes: u64,
}

impl CacheStatsSnapshot {
    /// Total entries across every collection.
    pub fn total_entries(&self) -> usize {
        self.profiles.size + self.posts.size + self.profile_stats.size
    }

    /// Each collection paired with its name.
    pub fn collections(&self) -> [(&'static str, CacheStats); 3] {
        [
            ("profiles", self.profiles),
            ("posts", self.posts),
            ("profile_stats", self.profile_stats),
        ]
    }

    /// Names of the collections where a new key will evict.
    pub fn full_collections(&self) -> Vec<&'static str> {
        self.collections()
            .into_iter()
            .filter(|(_, stats)| stats.is_full())
            .map(|(name, _)| name)
            .collect()
    }
}
