//! Cache Module
//!
//! Provides in-memory caching with TTL expiration and LRU eviction.

mod clock;
mod entry;
mod lru;
mod stats;
mod store;


use std::time::Duration;

// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use lru::LruTracker;
pub use stats::{CacheStats, CacheStatsSnapshot};
pub use store::TtlLruCache;

// == Public Constants ==
/// Expiry shared by every profile collection
pub const DEFAULT_TTL: Duration = Duration::from_secs(15 * 60);

/// Capacity of the profile collection
pub const PROFILE_CACHE_MAX: usize = 100;

/// Capacity of the per-owner post lists collection
pub const POSTS_CACHE_MAX: usize = 500;

/// Capacity of the per-owner aggregate stats collection
pub const STATS_CACHE_MAX: usize = 200;
