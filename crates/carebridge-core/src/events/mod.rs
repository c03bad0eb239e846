//! Domain events emitted by CareBridge controllers.
//!
//! Events are published on the [`EventBus`] and consumed by listeners that
//! must not share state with the emitting controller, such as the header
//! unread badge.

pub mod bus;
pub mod collaboration;
pub mod course;
pub mod notification;
pub mod profile;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use bus::EventBus;
pub use collaboration::CollaborationEvent;
pub use course::CourseEvent;
pub use notification::NotificationEvent;
pub use profile::ProfileEvent;

/// Wrapper for all domain events with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainEvent {
    /// Unique event ID.
    pub id: Uuid,
    /// When the event occurred.
    pub timestamp: DateTime<Utc>,
    /// The event payload.
    pub payload: EventPayload,
}

/// Union of all domain event types.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain", content = "event")]
pub enum EventPayload {
    /// A notification-list event.
    Notification(NotificationEvent),
    /// A course-progress event.
    Course(CourseEvent),
    /// A profile event.
    Profile(ProfileEvent),
    /// A collaboration-request event.
    Collaboration(CollaborationEvent),
}

impl DomainEvent {
    /// Create a new domain event.
    pub fn new(payload: EventPayload) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            payload,
        }
    }
}

impl From<NotificationEvent> for EventPayload {
    fn from(event: NotificationEvent) -> Self {
        Self::Notification(event)
    }
}

impl From<CourseEvent> for EventPayload {
    fn from(event: CourseEvent) -> Self {
        Self::Course(event)
    }
}

impl From<ProfileEvent> for EventPayload {
    fn from(event: ProfileEvent) -> Self {
        Self::Profile(event)
    }
}

impl From<CollaborationEvent> for EventPayload {
    fn from(event: CollaborationEvent) -> Self {
        Self::Collaboration(event)
    }
}
