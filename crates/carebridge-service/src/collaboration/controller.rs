//! Collaboration-request review.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};

use carebridge_client::{PlatformApi, RequestScope};
use carebridge_core::AppError;
use carebridge_core::events::{CollaborationEvent, EventBus};
use carebridge_core::result::AppResult;
use carebridge_core::traits::Toaster;
use carebridge_core::types::CollaborationRequestId;
use carebridge_entity::collaboration::{
    CollaborationRequest, Decision, RequestStatus, StatusUpdate,
};

use crate::state::LoadState;

/// Lists collaboration requests and records admin decisions.
#[derive(Debug)]
pub struct CollaborationController {
    api: Arc<dyn PlatformApi>,
    bus: EventBus,
    toaster: Arc<dyn Toaster>,
    requests: RwLock<LoadState<Vec<CollaborationRequest>>>,
}

impl CollaborationController {
    /// Creates a new collaboration controller.
    pub fn new(api: Arc<dyn PlatformApi>, bus: EventBus, toaster: Arc<dyn Toaster>) -> Self {
        Self {
            api,
            bus,
            toaster,
            requests: RwLock::new(LoadState::NotLoaded),
        }
    }

    /// Load requests in the given scope, replacing the local list.
    pub async fn load(&self, scope: RequestScope) -> AppResult<usize> {
        self.requests.write().await.begin();

        match self.api.list_collaboration_requests(scope).await {
            Ok(items) => {
                let len = items.len();
                self.requests.write().await.finish(items);
                Ok(len)
            }
            Err(e) => {
                self.requests.write().await.abort();
                self.fail("Failed to load collaboration requests", e)
            }
        }
    }

    /// Every request on the platform (admin only).
    pub async fn load_all(&self) -> AppResult<usize> {
        self.load(RequestScope::All).await
    }

    /// Requests involving the caller.
    pub async fn load_mine(&self) -> AppResult<usize> {
        self.load(RequestScope::Mine).await
    }

    /// Loaded requests.
    pub async fn requests(&self) -> Vec<CollaborationRequest> {
        self.requests
            .read()
            .await
            .value()
            .cloned()
            .unwrap_or_default()
    }

    /// Loaded requests with the given status.
    pub async fn with_status(&self, status: RequestStatus) -> Vec<CollaborationRequest> {
        self.requests
            .read()
            .await
            .value()
            .map(|items| items.iter().filter(|r| r.status == status).cloned().collect())
            .unwrap_or_default()
    }

    /// Requests still awaiting a decision.
    pub async fn pending(&self) -> Vec<CollaborationRequest> {
        self.with_status(RequestStatus::Pending).await
    }

    /// Approve or reject a request.
    ///
    /// A request known locally to be decided already is refused without a
    /// backend call. Requests not in the local list are sent as-is.
    pub async fn decide(
        &self,
        id: &CollaborationRequestId,
        decision: Decision,
        admin_response: Option<String>,
    ) -> AppResult<CollaborationRequest> {
        let target = decision.target_status();

        let known = self
            .requests
            .read()
            .await
            .value()
            .and_then(|items| items.iter().find(|r| &r.id == id).map(|r| r.status));
        if let Some(current) = known
            && !current.can_transition_to(target)
        {
            return self.fail(
                "Refused collaboration decision",
                AppError::validation(format!("Request has already been {current}")),
            );
        }

        let update = StatusUpdate {
            status: target,
            admin_response: admin_response.filter(|r| !r.trim().is_empty()),
        };
        let decided = match self.api.update_collaboration_status(id, &update).await {
            Ok(request) => request,
            Err(e) => return self.fail("Failed to update collaboration request", e),
        };

        if let Some(items) = self.requests.write().await.value_mut() {
            match items.iter_mut().find(|r| r.id == decided.id) {
                Some(slot) => *slot = decided.clone(),
                None => items.push(decided.clone()),
            }
        }

        self.bus.publish(CollaborationEvent::Decided {
            request_id: id.clone(),
            status: decided.status.to_string(),
        });
        info!(request_id = %id, status = %decided.status, "Collaboration request decided");
        self.toaster
            .success(&format!("Request {}", decided.status.as_str()));
        Ok(decided)
    }

    fn fail<T>(&self, context: &str, err: AppError) -> AppResult<T> {
        warn!(error = %err, "{context}");
        self.toaster.error(&err.user_message());
        Err(err)
    }
}
