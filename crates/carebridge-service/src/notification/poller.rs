//! Periodic notification refresh.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{self, MissedTickBehavior};

use super::controller::NotificationController;

/// Refreshes a [`NotificationController`] on a fixed interval.
#[derive(Debug, Clone)]
pub struct NotificationPoller {
    /// Controller to refresh.
    controller: Arc<NotificationController>,
    /// Time between refreshes.
    interval: Duration,
}

impl NotificationPoller {
    /// Create a poller. A zero interval is raised to one second.
    pub fn new(controller: Arc<NotificationController>, interval: Duration) -> Self {
        Self {
            controller,
            interval: interval.max(Duration::from_secs(1)),
        }
    }

    /// Time between refreshes.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Refresh immediately, then once per interval, until shutdown.
    ///
    /// A failed refresh has already been logged and toasted by the controller;
    /// the poller just waits for the next tick.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        tracing::info!(
            interval_seconds = self.interval.as_secs(),
            "Notification poller started"
        );

        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    // Sender dropped: no stop signal can arrive.
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
                _ = ticker.tick() => {
                    match self.controller.refresh().await {
                        Ok(len) => tracing::debug!(notifications = len, "Poll complete"),
                        Err(e) => tracing::debug!(error = %e, "Poll failed"),
                    }
                }
            }
        }

        tracing::info!("Notification poller stopped");
    }
}
