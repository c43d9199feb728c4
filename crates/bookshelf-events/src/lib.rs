//! # Bookshelf Events
//!
//! Fire-and-forget notifications for book mutations.
//!
//! Handlers call [`EventPublisher::publish`], which only enqueues onto a
//! bounded channel. A background worker drains the channel into an
//! [`EventSink`], by default a Redis Stream named after the topic.
//! Delivery is at-most-once: a full queue or a failed append drops the event.

mod event;
pub mod metrics;
mod publisher;
mod stream;

pub use event::{BookEvent, BookEventKind};
pub use publisher::{
    EventPublisher, EventSink, NoopEventPublisher, PublisherHandle, QueuedEventPublisher,
};
pub use stream::{create_pool, RedisStreamSink, DEFAULT_STREAM_MAX_LEN};
