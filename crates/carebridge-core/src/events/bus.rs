//! In-process publish/subscribe bus for domain events.

use tokio::sync::broadcast;

use super::{DomainEvent, EventPayload};

/// Broadcast bus decoupling event producers from their listeners.
///
/// Cloning the bus yields another handle onto the same channel.
#[derive(Debug, Clone)]
pub struct EventBus {
    /// Broadcast sender shared by all handles.
    tx: broadcast::Sender<DomainEvent>,
}

impl EventBus {
    /// Create a bus retaining at most `capacity` undelivered events per subscriber.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Publish an event. Returns the number of subscribers that received it.
    pub fn publish(&self, payload: impl Into<EventPayload>) -> usize {
        let event = DomainEvent::new(payload.into());
        tracing::trace!(event_id = %event.id, "Publishing domain event");
        self.tx.send(event).unwrap_or(0)
    }

    /// Subscribe to events published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.tx.subscribe()
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}
