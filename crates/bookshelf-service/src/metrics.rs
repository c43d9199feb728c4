//! Cache metrics.

use metrics::{counter, describe_counter};

/// Metric names for the look-aside cache.
pub mod names {
    /// Lookups answered from the cache.
    pub const CACHE_HITS_TOTAL: &str = "bookshelf_cache_hits_total";
    /// Lookups that fell through to the store.
    pub const CACHE_MISSES_TOTAL: &str = "bookshelf_cache_misses_total";
    /// Cache operations that failed and were ignored.
    pub const CACHE_ERRORS_TOTAL: &str = "bookshelf_cache_errors_total";
}

/// Register all metric descriptions.
pub fn register_metrics() {
    describe_counter!(names::CACHE_HITS_TOTAL, "Total number of cache hits");
    describe_counter!(names::CACHE_MISSES_TOTAL, "Total number of cache misses");
    describe_counter!(names::CACHE_ERRORS_TOTAL, "Total number of ignored cache failures");
}

/// Cache metrics recorder.
#[derive(Clone)]
pub struct CacheMetrics;

impl CacheMetrics {
    /// Record a hit for the given entry kind (`book` or `books`).
    pub fn hit(kind: &'static str) {
        counter!(names::CACHE_HITS_TOTAL, "kind" => kind).increment(1);
    }

    /// Record a miss for the given entry kind.
    pub fn miss(kind: &'static str) {
        counter!(names::CACHE_MISSES_TOTAL, "kind" => kind).increment(1);
    }

    /// Record a failed cache operation.
    pub fn error(operation: &'static str) {
        counter!(names::CACHE_ERRORS_TOTAL, "operation" => operation).increment(1);
    }
}
