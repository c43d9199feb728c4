//! Caching infrastructure for the service layer.
//!
//! This module provides a cache abstraction with a Redis implementation.
//! Entries are derived from the store and may be deleted at any time.

mod cache_interface;
pub mod cache_keys;
mod redis_cache;

pub use cache_interface::{CacheExt, CacheInterface};
pub use cache_keys::CacheKeys;
pub use redis_cache::{create_cache_pool, RedisCacheService};
