//! Metrics for event publication.

use metrics::{counter, describe_counter};

/// Metric names for event publication.
pub mod names {
    /// Events written to the sink.
    pub const EVENTS_PUBLISHED_TOTAL: &str = "bookshelf_events_published_total";
    /// Events discarded because the queue was full or closed.
    pub const EVENTS_DROPPED_TOTAL: &str = "bookshelf_events_dropped_total";
    /// Events the sink failed to accept.
    pub const EVENTS_FAILED_TOTAL: &str = "bookshelf_events_failed_total";
}

/// Register all metric descriptions.
pub fn register_metrics() {
    describe_counter!(names::EVENTS_PUBLISHED_TOTAL, "Total number of book events published");
    describe_counter!(
        names::EVENTS_DROPPED_TOTAL,
        "Total number of book events dropped before reaching the sink"
    );
    describe_counter!(
        names::EVENTS_FAILED_TOTAL,
        "Total number of book events the sink rejected"
    );
}

/// Event metrics recorder.
#[derive(Clone)]
pub struct EventMetrics;

impl EventMetrics {
    /// Record an event written to the sink.
    pub fn published(topic: &str, kind: &str) {
        counter!(
            names::EVENTS_PUBLISHED_TOTAL,
            "topic" => topic.to_string(),
            "kind" => kind.to_string()
        )
        .increment(1);
    }

    /// Record an event dropped before the worker saw it.
    pub fn dropped(topic: &str, reason: &'static str) {
        counter!(
            names::EVENTS_DROPPED_TOTAL,
            "topic" => topic.to_string(),
            "reason" => reason
        )
        .increment(1);
    }

    /// Record a failed append.
    pub fn failed(topic: &str) {
        counter!(names::EVENTS_FAILED_TOTAL, "topic" => topic.to_string()).increment(1);
    }
}
