//! # carebridge-service
//!
//! Client-side state controllers for the CareBridge dashboards. Each
//! controller owns the state of one dashboard feature, talks to the backend
//! through a [`carebridge_client::PlatformApi`], and reports every failed
//! remote call as a toast before returning the error.
//!
//! Controllers follow constructor injection: the API, event bus and toast
//! sink are provided at construction time via `Arc` references.

pub mod collaboration;
pub mod course;
pub mod notification;
pub mod profile;
pub mod state;
pub mod toast;


pub use collaboration::CollaborationController;
pub use course::{CoursePlayer, SectionLessons, SectionOutline};
pub use notification::{
    NotificationController, NotificationFilter, NotificationPoller, TypeFilter, UnreadBadge,
};
pub use profile::ProfileController;
pub use state::LoadState;
pub use toast::{ToastBuffer, TracingToaster};
