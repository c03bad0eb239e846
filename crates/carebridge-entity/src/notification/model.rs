//! Notification entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use carebridge_core::types::NotificationId;

use super::kind::NotificationType;
use crate::reference::EntityRef;

/// A notification delivered to a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Unique notification identifier.
    #[serde(rename = "_id")]
    pub id: NotificationId,
    /// The recipient user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<EntityRef>,
    /// What kind of event created the notification.
    #[serde(rename = "type")]
    pub kind: NotificationType,
    /// Notification title.
    #[serde(default)]
    pub title: String,
    /// Notification body text.
    #[serde(default)]
    pub message: String,
    /// Id of the document the notification is about (request, course, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_id: Option<EntityRef>,
    /// Whether the user has read this notification.
    #[serde(default)]
    pub read: bool,
    /// When the notification was created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// When the notification was last updated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Notification {
    /// Check if the notification has not been read yet.
    pub fn is_unread(&self) -> bool {
        !self.read
    }
}
