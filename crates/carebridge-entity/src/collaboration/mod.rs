//! Collaboration-request domain entities.

pub mod model;
pub mod status;

pub use model::{CollaborationRequest, StatusUpdate};
pub use status::{Decision, RequestStatus};
