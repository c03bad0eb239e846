//! Notification polling and badge configuration.

use serde::{Deserialize, Serialize};

/// Notification list and unread-badge settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    /// Seconds between background refreshes of the notification list.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_seconds: u64,
    /// Whether read notifications are shown when a list is first opened.
    #[serde(default = "default_true")]
    pub show_read_default: bool,
    /// Capacity of the in-process event bus.
    #[serde(default = "default_event_buffer")]
    pub event_buffer: usize,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            poll_interval_seconds: default_poll_interval(),
            show_read_default: true,
            event_buffer: default_event_buffer(),
        }
    }
}

fn default_poll_interval() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

fn default_event_buffer() -> usize {
    64
}
