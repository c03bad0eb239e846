//! Header badge that mirrors the broadcast unread count.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::broadcast::{self, error::RecvError};
use tokio::sync::watch;

use carebridge_core::events::{DomainEvent, EventPayload, NotificationEvent};

/// Listener holding the last unread count seen on the event bus.
///
/// Shares nothing with the notification controller; the bus is the only link.
#[derive(Debug, Default)]
pub struct UnreadBadge {
    count: AtomicUsize,
}

impl UnreadBadge {
    /// Create a badge showing zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current count.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::Acquire)
    }

    /// Apply one event. Returns the new count if the event changed it.
    pub fn apply(&self, event: &DomainEvent) -> Option<usize> {
        match &event.payload {
            EventPayload::Notification(NotificationEvent::UnreadCountChanged { count }) => {
                let previous = self.count.swap(*count, Ordering::AcqRel);
                (previous != *count).then_some(*count)
            }
            _ => None,
        }
    }

    /// Consume events until shutdown or until the bus closes.
    ///
    /// `on_change` runs for every count that differs from the previous one.
    pub async fn run<F>(
        self: Arc<Self>,
        mut events: broadcast::Receiver<DomainEvent>,
        mut shutdown: watch::Receiver<bool>,
        mut on_change: F,
    ) where
        F: FnMut(usize) + Send,
    {
        tracing::debug!("Unread badge listening");

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        tracing::debug!("Unread badge stopping");
                        break;
                    }
                }
                received = events.recv() => match received {
                    Ok(event) => {
                        if let Some(count) = self.apply(&event) {
                            on_change(count);
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "Unread badge lagged behind the event bus");
                    }
                    Err(RecvError::Closed) => break,
                },
            }
        }
    }
}
