//! Publisher front-end and background delivery worker.

use crate::metrics::EventMetrics;
use crate::BookEvent;
use async_trait::async_trait;
use bookshelf_core::{BookshelfResult, Interface};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Publishes book events without blocking the caller.
///
/// Implementations must return immediately. Failures are logged, never
/// reported back to the caller.
pub trait EventPublisher: Interface + Send + Sync {
    /// Hands an event over for delivery to `topic`.
    fn publish(&self, topic: &str, event: BookEvent);
}

/// Durable destination for events, written by the background worker.
#[async_trait]
pub trait EventSink: Interface + Send + Sync {
    /// Appends one event to `topic`.
    async fn append(&self, topic: &str, event: &BookEvent) -> BookshelfResult<()>;
}

struct Envelope {
    topic: String,
    event: BookEvent,
}

/// Publisher backed by a bounded queue and a single delivery task.
#[derive(Clone)]
pub struct QueuedEventPublisher {
    tx: mpsc::Sender<Envelope>,
}

/// Controls the delivery task spawned by [`QueuedEventPublisher::spawn`].
pub struct PublisherHandle {
    shutdown_tx: oneshot::Sender<()>,
    worker: JoinHandle<()>,
}

impl QueuedEventPublisher {
    /// Spawns the delivery task and returns the publisher with its handle.
    ///
    /// Must be called inside a Tokio runtime. A zero capacity is raised to one.
    #[must_use]
    pub fn spawn(sink: Arc<dyn EventSink>, capacity: usize) -> (Self, PublisherHandle) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let worker = tokio::spawn(run_worker(sink, rx, shutdown_rx));
        info!(capacity = capacity.max(1), "Event publisher started");

        (Self { tx }, PublisherHandle { shutdown_tx, worker })
    }
}

impl EventPublisher for QueuedEventPublisher {
    fn publish(&self, topic: &str, event: BookEvent) {
        let kind = event.kind;
        let book_id = event.book_id;
        let envelope = Envelope {
            topic: topic.to_string(),
            event,
        };

        match self.tx.try_send(envelope) {
            Ok(()) => debug!(%topic, %kind, %book_id, "Event queued"),
            Err(TrySendError::Full(_)) => {
                warn!(%topic, %kind, %book_id, "Event queue full, dropping event");
                EventMetrics::dropped(topic, "full");
            }
            Err(TrySendError::Closed(_)) => {
                warn!(%topic, %kind, %book_id, "Event publisher stopped, dropping event");
                EventMetrics::dropped(topic, "closed");
            }
        }
    }
}

impl PublisherHandle {
    /// Stops accepting events and waits for queued events to be delivered.
    ///
    /// Events still queued after `grace` are abandoned.
    pub async fn shutdown(self, grace: Duration) {
        info!("Draining event publisher...");
        let _ = self.shutdown_tx.send(());

        match tokio::time::timeout(grace, self.worker).await {
            Ok(Ok(())) => info!("Event publisher drained"),
            Ok(Err(e)) => warn!("Event publisher task failed: {}", e),
            Err(_) => warn!("Event publisher did not drain within {:?}", grace),
        }
    }
}

async fn run_worker(
    sink: Arc<dyn EventSink>,
    mut rx: mpsc::Receiver<Envelope>,
    mut shutdown_rx: oneshot::Receiver<()>,
) {
    let mut shutdown_seen = false;

    loop {
        tokio::select! {
            envelope = rx.recv() => match envelope {
                Some(envelope) => deliver(sink.as_ref(), envelope).await,
                None => break,
            },
            signal = &mut shutdown_rx, if !shutdown_seen => {
                shutdown_seen = true;
                // A dropped handle leaves the publisher running.
                if signal.is_ok() {
                    rx.close();
                }
            }
        }
    }

    debug!("Event worker stopped");
}

async fn deliver(sink: &dyn EventSink, envelope: Envelope) {
    let Envelope { topic, event } = envelope;

    match sink.append(&topic, &event).await {
        Ok(()) => {
            debug!(%topic, kind = %event.kind, book_id = %event.book_id, "Event published");
            EventMetrics::published(&topic, event.kind.as_str());
        }
        Err(e) => {
            warn!(%topic, kind = %event.kind, book_id = %event.book_id, error = %e, "Failed to publish event");
            EventMetrics::failed(&topic);
        }
    }
}

/// Publisher that discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopEventPublisher;

impl EventPublisher for NoopEventPublisher {
    fn publish(&self, topic: &str, event: BookEvent) {
        debug!(%topic, kind = %event.kind, "Events disabled, discarding event");
    }
}
