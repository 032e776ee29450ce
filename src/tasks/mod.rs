//! Background Tasks Module
//!
//! Optional tasks scheduled alongside the cache.
//!
//! # Tasks
//! - Expiry Sweep: Removes expired entries at a configured interval

mod sweep;

pub use sweep::spawn_sweep_task;
