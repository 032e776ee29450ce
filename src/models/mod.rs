//! Payload models held by the profile caches
//!
//! These are produced by the auth/profile layer and only stored here.

pub mod profile;
pub mod stats;

// Re-export commonly used types
pub use profile::{Post, Profile};
pub use stats::{ProfileStats, StatValue};
