//! Service Module
//!
//! The three profile collections and the rules that tie them together.

mod fixtures;
mod profile_cache;

pub use fixtures::Fixtures;
pub use profile_cache::ProfileCacheService;
