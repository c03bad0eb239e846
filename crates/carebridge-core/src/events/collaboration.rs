//! Collaboration-request events.

use serde::{Deserialize, Serialize};

use crate::types::CollaborationRequestId;

/// Events emitted by the collaboration review controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CollaborationEvent {
    /// A pending request was approved or rejected.
    Decided {
        /// The decided request.
        request_id: CollaborationRequestId,
        /// The new status (`approved` or `rejected`).
        status: String,
    },
}
