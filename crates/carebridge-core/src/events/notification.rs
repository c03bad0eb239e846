//! Notification-list events.

use serde::{Deserialize, Serialize};

use crate::types::NotificationId;

/// Events emitted by the notification list controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum NotificationEvent {
    /// The locally-held unread count was recomputed after a list change.
    UnreadCountChanged {
        /// Number of notifications with the read flag unset.
        count: usize,
    },
    /// A notification was deleted on the server and removed locally.
    Deleted {
        /// The deleted notification.
        notification_id: NotificationId,
    },
}
