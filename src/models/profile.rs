//! Profile and post records
//!
//! The primary entity and the elements of its associated list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user's public profile.
///
/// Cached under its own `id`; `owner_id` is the account that owns it and is
/// what owner-wide invalidation matches on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Profile identifier, also the cache key
    pub id: String,
    /// Owning account identifier
    pub owner_id: String,
    pub username: String,
    pub display_name: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Creates a profile with the display name defaulted to the username.
    pub fn new(
        id: impl Into<String>,
        owner_id: impl Into<String>,
        username: impl Into<String>,
    ) -> Self {
        let username = username.into();
        Self {
            id: id.into(),
            owner_id: owner_id.into(),
            display_name: username.clone(),
            username,
            bio: None,
            avatar_url: None,
            updated_at: Utc::now(),
        }
    }

    /// Sets the bio.
    pub fn with_bio(mut self, bio: impl Into<String>) -> Self {
        self.bio = Some(bio.into());
        self
    }

    /// True when `owner_id` owns this profile.
    pub fn is_owned_by(&self, owner_id: &str) -> bool {
        self.owner_id == owner_id
    }
}

/// A post in an owner's feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub author_id: String,
    pub body: String,
    #[serde(default)]
    pub like_count: u64,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Creates a post stamped with the current time.
    pub fn new(
        id: impl Into<String>,
        author_id: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            author_id: author_id.into(),
            body: body.into(),
            like_count: 0,
            created_at: Utc::now(),
        }
    }
}
