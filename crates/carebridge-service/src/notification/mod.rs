//! Notification list controller, client-side filtering, unread badge and poller.

pub mod badge;
pub mod controller;
pub mod filter;
pub mod poller;

pub use badge::UnreadBadge;
pub use controller::NotificationController;
pub use filter::{NotificationFilter, TypeFilter};
pub use poller::NotificationPoller;
