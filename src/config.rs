//! Configuration Module
//!
//! Handles loading and managing cache configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::{DEFAULT_TTL, POSTS_CACHE_MAX, PROFILE_CACHE_MAX, STATS_CACHE_MAX};
use crate::error::{CacheError, Result};

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of cached profiles
    pub profile_cache_max: usize,
    /// Maximum number of cached post lists
    pub posts_cache_max: usize,
    /// Maximum number of cached stats mappings
    pub stats_cache_max: usize,
    /// Expiry shared by all collections, in minutes
    pub ttl_minutes: u64,
    /// Expiry sweep interval in seconds, 0 = lazy expiry only
    pub sweep_interval: u64,
    /// Optional JSON fixtures preloaded at startup
    pub fixtures_path: Option<PathBuf>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `PROFILE_CACHE_MAX` - Profile capacity (default: 100)
    /// - `POSTS_CACHE_MAX` - Post list capacity (default: 500)
    /// - `STATS_CACHE_MAX` - Stats capacity (default: 200)
    /// - `CACHE_TTL_MINUTES` - Expiry in minutes (default: 15)
    /// - `SWEEP_INTERVAL` - Sweep frequency in seconds (default: 0, disabled)
    /// - `CACHE_FIXTURES` - Path of a JSON fixtures file (default: unset)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            profile_cache_max: env_or("PROFILE_CACHE_MAX", defaults.profile_cache_max),
            posts_cache_max: env_or("POSTS_CACHE_MAX", defaults.posts_cache_max),
            stats_cache_max: env_or("STATS_CACHE_MAX", defaults.stats_cache_max),
            ttl_minutes: env_or("CACHE_TTL_MINUTES", defaults.ttl_minutes),
            sweep_interval: env_or("SWEEP_INTERVAL", defaults.sweep_interval),
            fixtures_path: env::var_os("CACHE_FIXTURES")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
        }
    }

    /// Rejects zero capacities and an expiry that is zero or too large to
    /// express in seconds.
    pub fn validate(&self) -> Result<()> {
        let capacities = [
            ("PROFILE_CACHE_MAX", self.profile_cache_max),
            ("POSTS_CACHE_MAX", self.posts_cache_max),
            ("STATS_CACHE_MAX", self.stats_cache_max),
        ];
        for (name, value) in capacities {
            if value == 0 {
                return Err(CacheError::InvalidConfig(format!(
                    "{} must be at least 1",
                    name
                )));
            }
        }
        if self.ttl_minutes == 0 {
            return Err(CacheError::InvalidConfig(
                "CACHE_TTL_MINUTES must be at least 1".to_string(),
            ));
        }
        if self.ttl_minutes.checked_mul(60).is_none() {
            return Err(CacheError::InvalidConfig(format!(
                "CACHE_TTL_MINUTES is too large: {}",
                self.ttl_minutes
            )));
        }
        Ok(())
    }

    /// Expiry as a duration, saturating for values `validate` rejects.
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_minutes.saturating_mul(60))
    }

    /// Sweep interval, or None when the sweep is disabled.
    pub fn sweep_interval(&self) -> Option<Duration> {
        (self.sweep_interval > 0).then(|| Duration::from_secs(self.sweep_interval))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            profile_cache_max: PROFILE_CACHE_MAX,
            posts_cache_max: POSTS_CACHE_MAX,
            stats_cache_max: STATS_CACHE_MAX,
            ttl_minutes: DEFAULT_TTL.as_secs() / 60,
            sweep_interval: 0,
            fixtures_path: None,
        }
    }
}

/// Parses `name` from the environment, falling back to `default` when unset or unparseable.
fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
