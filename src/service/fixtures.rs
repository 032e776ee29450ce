//! Fixture documents for bulk preloading.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{Post, Profile, ProfileStats};

/// A JSON document holding values for every collection.
///
/// ```json
/// {
///   "profiles": [{ "id": "u1", "owner_id": "u1", ... }],
///   "posts": { "u1": [{ "id": "p1", ... }] },
///   "stats": { "u1": { "followers": 10 } }
/// }
/// ```
///
/// Missing sections default to empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fixtures {
    #[serde(default)]
    pub profiles: Vec<Profile>,
    /// Post lists keyed by owner id
    #[serde(default)]
    pub posts: BTreeMap<String, Vec<Post>>,
    /// Stats keyed by owner id
    #[serde(default)]
    pub stats: BTreeMap<String, ProfileStats>,
}

impl Fixtures {
    /// Parses fixtures from a JSON string.
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Reads and parses a JSON fixtures file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Total number of cacheable values in the document.
    pub fn len(&self) -> usize {
        self.profiles.len() + self.posts.len() + self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CacheError;

    const SAMPLE: &str = r#"{
        "profiles": [
            {
                "id": "u1",
                "owner_id": "u1",
                "username": "ada",
                "display_name": "Ada",
                "updated_at": "2024-05-01T12:00:00Z"
            }
        ],
        "posts": {
            "u1": [
                {
                    "id": "post-1",
                    "author_id": "u1",
                    "body": "hi",
                    "created_at": "2024-05-01T12:00:00Z"
                }
            ]
        },
        "stats": {
            "u1": {"followers": 12, "verified": true}
        }
    }"#;

    #[test]
    fn test_fixtures_from_json() {
        let fixtures = Fixtures::from_json(SAMPLE).unwrap();

        assert_eq!(fixtures.len(), 3);
        assert_eq!(fixtures.profiles[0].username, "ada");
        assert_eq!(fixtures.posts["u1"].len(), 1);
        assert_eq!(
            fixtures.stats["u1"].get("followers").and_then(|v| v.as_int()),
            Some(12)
        );
    }

    #[test]
    fn test_fixtures_missing_sections_default() {
        let fixtures = Fixtures::from_json("{}").unwrap();
        assert!(fixtures.is_empty());
    }

    #[test]
    fn test_fixtures_malformed() {
        let result = Fixtures::from_json(r#"{"profiles": 5}"#);
        assert!(matches!(result, Err(CacheError::Json(_))));
    }

    #[test]
    fn test_fixtures_from_path() {
        let name = format!("profile_cache_fixtures_{}.json", std::process::id());
        let path = std::env::temp_dir().join(name);
        fs::write(&path, SAMPLE).unwrap();

        let fixtures = Fixtures::from_path(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(fixtures.profiles.len(), 1);
    }

    #[test]
    fn test_fixtures_missing_file() {
        let result = Fixtures::from_path("/definitely/not/here.json");
        assert!(matches!(result, Err(CacheError::Io(_))));
    }
}
