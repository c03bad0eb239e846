//! Collaboration-request entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use carebridge_core::types::CollaborationRequestId;

use super::status::RequestStatus;
use crate::reference::EntityRef;

/// A professional's request to collaborate on a student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollaborationRequest {
    /// Unique request identifier.
    #[serde(rename = "_id")]
    pub id: CollaborationRequestId,
    /// The professional asking to collaborate.
    pub requester: EntityRef,
    /// The student the request concerns.
    pub student: EntityRef,
    /// Free-form request category chosen by the requester.
    #[serde(default)]
    pub request_type: String,
    /// The requester's justification.
    #[serde(default)]
    pub reason: String,
    /// Review status.
    pub status: RequestStatus,
    /// The admin's note attached to the decision.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_response: Option<String>,
    /// The admin who decided the request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_by: Option<EntityRef>,
    /// When the decision was recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<DateTime<Utc>>,
    /// When the request was created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl CollaborationRequest {
    /// Check if the request still awaits a decision.
    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }
}

/// Body of `PUT /api/collaboration-requests/:id/status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate {
    /// The new status.
    pub status: RequestStatus,
    /// Optional note for the requester.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_response: Option<String>,
}
