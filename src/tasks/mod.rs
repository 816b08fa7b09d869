//! Background Tasks Module
//!
//! Contains background tasks that run for the lifetime of a cache.
//!
//! # Tasks
//! - Expiration reaper: removes expired entries at a fixed interval

mod reaper;

pub(crate) use reaper::spawn_reaper;
