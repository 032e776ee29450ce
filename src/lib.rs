//! Profile Cache - in-memory caching for profile data
//!
//! Three TTL + LRU collections (profiles, post lists, aggregate stats) with
//! cross-collection invalidation.

pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod tasks;

pub use cache::{CacheStatsSnapshot, TtlLruCache};
pub use config::Config;
pub use error::{CacheError, Result};
pub use service::{Fixtures, ProfileCacheService};
pub use tasks::spawn_sweep_task;
