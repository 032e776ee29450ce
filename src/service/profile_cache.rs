//! Profile Cache Service
//!
//! Owns one engine per collection and applies cross-collection invalidation.

use tracing::{debug, info};

use crate::cache::{CacheStatsSnapshot, Clock, SystemClock, TtlLruCache};
use crate::config::Config;
use crate::models::{Post, Profile, ProfileStats};
use crate::service::Fixtures;

/// Cache for profiles, their post lists, and their aggregate stats.
///
/// Profiles are keyed by profile id; post lists and stats are keyed by owner
/// id. A profile's id doubles as the owner id of its own lists and stats.
///
/// Constructed once at startup and shared by reference (typically `Arc`).
/// Each collection has its own lock, so traffic on one never blocks another.
#[derive(Debug)]
pub struct ProfileCacheService<C = SystemClock> {
    profiles: TtlLruCache<Profile, C>,
    posts: TtlLruCache<Vec<Post>, C>,
    stats: TtlLruCache<ProfileStats, C>,
}

impl ProfileCacheService<SystemClock> {
    /// Creates the service from configuration using the system clock.
    pub fn new(config: &Config) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock + Clone> ProfileCacheService<C> {
    /// Creates the service with every collection reading time from `clock`.
    pub fn with_clock(config: &Config, clock: C) -> Self {
        let ttl = config.ttl();
        Self {
            profiles: TtlLruCache::with_clock(config.profile_cache_max, ttl, clock.clone()),
            posts: TtlLruCache::with_clock(config.posts_cache_max, ttl, clock.clone()),
            stats: TtlLruCache::with_clock(config.stats_cache_max, ttl, clock),
        }
    }

    // == Profiles ==

    pub fn cache_profile(&self, id: impl Into<String>, profile: Profile) {
        self.profiles.put(id, profile);
    }

    pub fn get_cached_profile(&self, id: &str) -> Option<Profile> {
        self.profiles.get(id)
    }

    pub fn invalidate_profile(&self, id: &str) {
        self.profiles.invalidate(id);
    }

    /// Caches each profile under its own id.
    pub fn preload_profiles<I>(&self, profiles: I)
    where
        I: IntoIterator<Item = Profile>,
    {
        self.profiles.preload(profiles.into_iter().map(|profile| (profile.id.clone(), profile)));
    }

    // == Post Lists ==

    pub fn cache_posts(&self, owner_id: impl Into<String>, posts: Vec<Post>) {
        self.posts.put(owner_id, posts);
    }

    /// Returns a copy of the owner's posts; mutating it leaves the cache intact.
    pub fn get_cached_posts(&self, owner_id: &str) -> Option<Vec<Post>> {
        self.posts.get(owner_id)
    }

    pub fn invalidate_posts(&self, owner_id: &str) {
        self.posts.invalidate(owner_id);
    }

    pub fn preload_posts<I, K>(&self, lists: I)
    where
        I: IntoIterator<Item = (K, Vec<Post>)>,
        K: Into<String>,
    {
        self.posts.preload(lists);
    }

    // == Aggregate Stats ==

    pub fn cache_profile_stats(&self, owner_id: impl Into<String>, stats: ProfileStats) {
        self.stats.put(owner_id, stats);
    }

    /// Returns a copy of the owner's stats mapping.
    pub fn get_cached_profile_stats(&self, owner_id: &str) -> Option<ProfileStats> {
        self.stats.get(owner_id)
    }

    pub fn invalidate_profile_stats(&self, owner_id: &str) {
        self.stats.invalidate(owner_id);
    }

    pub fn preload_profile_stats<I, K>(&self, stats: I)
    where
        I: IntoIterator<Item = (K, ProfileStats)>,
        K: Into<String>,
    {
        self.stats.preload(stats);
    }

    // == Cross-Collection ==

    /// Drops the profile `id` along with the post list and stats keyed by `id`.
    pub fn invalidate_entity(&self, id: &str) {
        self.profiles.invalidate(id);
        self.posts.invalidate(id);
        self.stats.invalidate(id);
        debug!(id = %id, "Invalidated entity across collections");
    }

    /// Drops every profile owned by `owner_id`, then clears the post list and
    /// stats collections in full.
    ///
    /// Lists and stats carry no owner tag of their own, so they cannot be
    /// filtered; entries belonging to unrelated owners are dropped as well.
    /// Returns the number of profiles removed.
    pub fn invalidate_owner(&self, owner_id: &str) -> usize {
        let removed = self
            .profiles
            .invalidate_where(|profile| profile.is_owned_by(owner_id));
        self.posts.clear();
        self.stats.clear();
        debug!(owner_id = %owner_id, profiles_removed = removed, "Invalidated owner");
        removed
    }

    /// Empties every collection.
    pub fn clear_all(&self) {
        self.profiles.clear();
        self.posts.clear();
        self.stats.clear();
        info!("Cleared all profile caches");
    }

    /// Bulk-loads every collection from `fixtures`.
    pub fn preload_fixtures(&self, fixtures: Fixtures) {
        let Fixtures {
            profiles,
            posts,
            stats,
        } = fixtures;
        self.preload_profiles(profiles);
        self.preload_posts(posts);
        self.preload_profile_stats(stats);
    }

    /// Removes expired entries from every collection.
    ///
    /// Only the sweep task calls this; normal reads expire lazily.
    pub fn purge_expired(&self) -> usize {
        self.profiles.purge_expired() + self.posts.purge_expired() + self.stats.purge_expired()
    }

    /// Snapshot of sizes, bounds, and the shared expiry.
    pub fn cache_stats(&self) -> CacheStatsSnapshot {
        CacheStatsSnapshot {
            profiles: self.profiles.stats(),
            posts: self.posts.stats(),
            profile_stats: self.stats.stats(),
            expiry_minutes: self.profiles.ttl().as_secs() / 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;
    use std::time::Duration;

    fn service() -> (ProfileCacheService<ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        (
            ProfileCacheService::with_clock(&Config::default(), clock.clone()),
            clock,
        )
    }

    fn posts_for(owner: &str, count: usize) -> Vec<Post> {
        (0..count)
            .map(|i| Post::new(format!("{}-post-{}", owner, i), owner, "hello"))
            .collect()
    }

    #[test]
    fn test_profile_roundtrip() {
        let (cache, _) = service();
        let profile = Profile::new("u1", "u1", "ada");

        cache.cache_profile("u1", profile.clone());

        assert_eq!(cache.get_cached_profile("u1"), Some(profile));
        assert_eq!(cache.get_cached_profile("u2"), None);
    }

    #[test]
    fn test_posts_are_defensive_copies() {
        let (cache, _) = service();
        cache.cache_posts("u1", posts_for("u1", 2));

        let mut returned = cache.get_cached_posts("u1").unwrap();
        returned.clear();

        assert_eq!(cache.get_cached_posts("u1").map(|p| p.len()), Some(2));
    }

    #[test]
    fn test_stats_are_defensive_copies() {
        let (cache, _) = service();
        cache.cache_profile_stats("u1", ProfileStats::new().with("followers", 3i64));

        let mut returned = cache.get_cached_profile_stats("u1").unwrap();
        returned.insert("followers", 1000i64);

        let cached = cache.get_cached_profile_stats("u1").unwrap();
        assert_eq!(cached.get("followers").and_then(|v| v.as_int()), Some(3));
    }

    #[test]
    fn test_invalidate_single_collection() {
        let (cache, _) = service();
        cache.cache_profile("u1", Profile::new("u1", "u1", "ada"));
        cache.cache_posts("u1", posts_for("u1", 1));
        cache.cache_profile_stats("u1", ProfileStats::new());

        cache.invalidate_posts("u1");

        assert!(cache.get_cached_posts("u1").is_none());
        assert!(cache.get_cached_profile("u1").is_some());
        assert!(cache.get_cached_profile_stats("u1").is_some());

        cache.invalidate_profile("u1");
        cache.invalidate_profile_stats("u1");
        assert_eq!(cache.cache_stats().total_entries(), 0);
    }

    #[test]
    fn test_invalidate_entity_spans_collections() {
        let (cache, _) = service();
        for id in ["u1", "u2"] {
            cache.cache_profile(id, Profile::new(id, id, id));
            cache.cache_posts(id, posts_for(id, 1));
            cache.cache_profile_stats(id, ProfileStats::new());
        }

        cache.invalidate_entity("u1");

        assert!(cache.get_cached_profile("u1").is_none());
        assert!(cache.get_cached_posts("u1").is_none());
        assert!(cache.get_cached_profile_stats("u1").is_none());
        assert!(cache.get_cached_profile("u2").is_some());
        assert!(cache.get_cached_posts("u2").is_some());
        assert!(cache.get_cached_profile_stats("u2").is_some());
    }

    #[test]
    fn test_invalidate_owner_breadth() {
        let (cache, _) = service();
        cache.cache_profile("p1", Profile::new("p1", "owner-a", "one"));
        cache.cache_profile("p2", Profile::new("p2", "owner-a", "two"));
        cache.cache_profile("p3", Profile::new("p3", "owner-b", "three"));
        cache.cache_posts("owner-a", posts_for("owner-a", 1));
        cache.cache_posts("owner-b", posts_for("owner-b", 1));
        cache.cache_profile_stats("owner-b", ProfileStats::new());

        let removed = cache.invalidate_owner("owner-a");

        assert_eq!(removed, 2);
        assert!(cache.get_cached_profile("p1").is_none());
        assert!(cache.get_cached_profile("p2").is_none());
        assert!(cache.get_cached_profile("p3").is_some());

        // Lists and stats are cleared regardless of owner
        let stats = cache.cache_stats();
        assert_eq!(stats.posts.size, 0);
        assert_eq!(stats.profile_stats.size, 0);
    }

    #[test]
    fn test_invalidate_owner_without_matches_still_clears_lists() {
        let (cache, _) = service();
        cache.cache_profile("p1", Profile::new("p1", "owner-a", "one"));
        cache.cache_posts("owner-a", posts_for("owner-a", 3));

        assert_eq!(cache.invalidate_owner("nobody"), 0);
        assert!(cache.get_cached_profile("p1").is_some());
        assert!(cache.get_cached_posts("owner-a").is_none());
    }

    #[test]
    fn test_clear_all_is_idempotent() {
        let (cache, _) = service();
        cache.cache_profile("u1", Profile::new("u1", "u1", "ada"));
        cache.cache_posts("u1", posts_for("u1", 1));

        cache.clear_all();
        let once = cache.cache_stats();
        cache.clear_all();

        assert_eq!(cache.cache_stats(), once);
        assert_eq!(once.total_entries(), 0);
    }

    #[test]
    fn test_cache_stats_reports_bounds() {
        let (cache, _) = service();
        cache.cache_profile("u1", Profile::new("u1", "u1", "ada"));

        let stats = cache.cache_stats();
        assert_eq!(stats.profiles.size, 1);
        assert_eq!(stats.profiles.max_size, 100);
        assert_eq!(stats.posts.max_size, 500);
        assert_eq!(stats.profile_stats.max_size, 200);
        assert_eq!(stats.expiry_minutes, 15);
    }

    #[test]
    fn test_preload_profiles_keys_by_id() {
        let (cache, _) = service();

        cache.preload_profiles(vec![
            Profile::new("p1", "o", "one"),
            Profile::new("p2", "o", "two"),
        ]);

        assert_eq!(cache.get_cached_profile("p2").map(|p| p.username), Some("two".to_string()));
        assert_eq!(cache.cache_stats().profiles.size, 2);
    }

    #[test]
    fn test_expiry_shared_across_collections() {
        let (cache, clock) = service();
        cache.cache_profile("u1", Profile::new("u1", "u1", "ada"));
        cache.cache_posts("u1", posts_for("u1", 1));

        clock.advance(Duration::from_secs(16 * 60));

        assert!(cache.get_cached_profile("u1").is_none());
        assert!(cache.get_cached_posts("u1").is_none());
    }

    #[test]
    fn test_purge_expired_counts_all_collections() {
        let (cache, clock) = service();
        cache.cache_profile("u1", Profile::new("u1", "u1", "ada"));
        cache.cache_posts("u1", posts_for("u1", 1));
        cache.cache_profile_stats("u1", ProfileStats::new());

        clock.advance(Duration::from_secs(5 * 60));
        cache.cache_profile("u2", Profile::new("u2", "u2", "bob"));
        clock.advance(Duration::from_secs(11 * 60));

        assert_eq!(cache.purge_expired(), 3);
        assert_eq!(cache.cache_stats().total_entries(), 1);
    }
}
