//! Collaboration request integration tests.

mod helpers;

use carebridge_core::ErrorKind;
use carebridge_core::traits::ToastLevel;
use carebridge_core::types::CollaborationRequestId;
use carebridge_entity::collaboration::{Decision, RequestStatus};
use carebridge_service::CollaborationController;
use helpers::{MockBackend, request};

async fn seeded() -> MockBackend {
    let backend = MockBackend::start().await;
    backend.state.requests.lock().unwrap().extend([
        request("r1", "pending"),
        request("r2", "approved"),
        request("r3", "pending"),
    ]);
    backend
}

#[tokio::test]
async fn test_approve_with_response() {
    let backend = seeded().await;
    let (api, bus, toasts) = backend.harness();
    let controller = CollaborationController::new(api, bus, toasts.clone());
    assert_eq!(controller.load_all().await.unwrap(), 3);

    let decided = controller
        .decide(
            &CollaborationRequestId::new("r1"),
            Decision::Approve,
            Some("Welcome aboard".to_string()),
        )
        .await
        .unwrap();

    assert_eq!(decided.status, RequestStatus::Approved);
    assert_eq!(decided.admin_response.as_deref(), Some("Welcome aboard"));
    assert_eq!(controller.pending().await.len(), 1);
    assert_eq!(
        backend.state.requests.lock().unwrap()[0]["status"],
        serde_json::json!("approved")
    );
    assert_eq!(toasts.messages(ToastLevel::Success), vec!["Request approved"]);
}

#[tokio::test]
async fn test_blank_response_is_not_sent() {
    let backend = seeded().await;
    let (api, bus, toasts) = backend.harness();
    let controller = CollaborationController::new(api, bus, toasts);
    controller.load_mine().await.unwrap();

    controller
        .decide(
            &CollaborationRequestId::new("r3"),
            Decision::Reject,
            Some("   ".to_string()),
        )
        .await
        .unwrap();

    let stored = backend.state.requests.lock().unwrap()[2].clone();
    assert_eq!(stored["status"], serde_json::json!("rejected"));
    assert!(stored.get("adminResponse").is_none());
}

#[tokio::test]
async fn test_decided_request_is_refused_locally() {
    let backend = seeded().await;
    let (api, bus, toasts) = backend.harness();
    let controller = CollaborationController::new(api, bus, toasts.clone());
    controller.load_all().await.unwrap();
    let calls_before = backend.state.auth_headers.lock().unwrap().len();

    let err = controller
        .decide(&CollaborationRequestId::new("r2"), Decision::Reject, None)
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Validation);
    assert_eq!(err.message, "Request has already been approved");
    assert_eq!(backend.state.auth_headers.lock().unwrap().len(), calls_before);
    assert_eq!(toasts.messages(ToastLevel::Error).len(), 1);
}

#[tokio::test]
async fn test_server_refusal_keeps_local_state() {
    let backend = seeded().await;
    let (api, bus, toasts) = backend.harness();
    let controller = CollaborationController::new(api, bus, toasts.clone());
    controller.load_all().await.unwrap();
    // Decided elsewhere after the list was loaded.
    backend.state.requests.lock().unwrap()[0]["status"] = serde_json::json!("rejected");

    let err = controller
        .decide(&CollaborationRequestId::new("r1"), Decision::Approve, None)
        .await
        .unwrap_err();

    assert_eq!(err.message, "Request has already been processed");
    assert_eq!(controller.pending().await.len(), 2);
    assert_eq!(
        toasts.messages(ToastLevel::Error),
        vec!["Request has already been processed"]
    );
}
