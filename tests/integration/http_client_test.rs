//! HTTP client integration tests against the mock backend.

mod helpers;

use std::sync::Arc;

use carebridge_client::{
    AvatarUpload, HttpPlatformApi, MemoryTokenStore, PlatformApi, RequestScope,
};
use carebridge_core::ErrorKind;
use carebridge_core::config::api::ApiConfig;
use carebridge_core::types::{CollaborationRequestId, NotificationId, UserId};
use carebridge_entity::collaboration::{RequestStatus, StatusUpdate};
use helpers::{MockBackend, TEST_TOKEN, notification, request, user};

#[tokio::test]
async fn test_bearer_header_sent_only_with_stored_token() {
    let backend = MockBackend::start().await;

    backend.client(Some(TEST_TOKEN)).list_notifications().await.unwrap();
    backend.client(None).list_notifications().await.unwrap();

    let headers = backend.state.auth_headers.lock().unwrap().clone();
    assert_eq!(
        headers,
        vec![Some(format!("Bearer {TEST_TOKEN}")), None],
    );
}

#[tokio::test]
async fn test_bare_and_wrapped_lists_decode_alike() {
    let bare = MockBackend::start().await;
    let wrapped = MockBackend::start_wrapped().await;
    for backend in [&bare, &wrapped] {
        backend.state.notifications.lock().unwrap().extend([
            notification("n1", "system", false),
            notification("n2", "course_activity", true),
        ]);
    }

    let from_bare = bare.client(Some(TEST_TOKEN)).list_notifications().await.unwrap();
    let from_wrapped = wrapped.client(Some(TEST_TOKEN)).list_notifications().await.unwrap();

    assert_eq!(from_bare, from_wrapped);
    assert_eq!(from_bare.len(), 2);
    assert!(from_bare[1].read);
}

#[tokio::test]
async fn test_server_message_surfaces_in_error() {
    let backend = MockBackend::start().await;
    let api = backend.client(Some(TEST_TOKEN));

    let err = api
        .mark_notification_read(&NotificationId::new("missing"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
    assert_eq!(err.user_message(), "Notification not found");
}

#[tokio::test]
async fn test_error_field_is_used_when_message_is_absent() {
    let backend = MockBackend::start().await;
    backend
        .state
        .requests
        .lock()
        .unwrap()
        .push(request("r1", "approved"));
    let api = backend.client(Some(TEST_TOKEN));

    let err = api
        .update_collaboration_status(
            &CollaborationRequestId::new("r1"),
            &StatusUpdate {
                status: RequestStatus::Rejected,
                admin_response: None,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
    assert_eq!(err.message, "Request has already been processed");
}

#[tokio::test]
async fn test_unreachable_backend_is_a_transport_error() {
    let config = ApiConfig {
        base_url: "http://127.0.0.1:9".to_string(),
        request_timeout_seconds: 2,
        ..ApiConfig::default()
    };
    let api = HttpPlatformApi::new(&config, Arc::new(MemoryTokenStore::default())).unwrap();

    let err = api
        .list_collaboration_requests(RequestScope::Mine)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Transport);
    assert!(err.user_message().starts_with("Network error"));
}

#[tokio::test]
async fn test_avatar_upload_is_multipart() {
    let backend = MockBackend::start().await;
    backend.state.users.lock().unwrap().push(user("u1", "parent"));
    let api = backend.client(Some(TEST_TOKEN));

    let response = api
        .upload_avatar(
            &UserId::new("u1"),
            AvatarUpload {
                file_name: "me.png".to_string(),
                mime_type: AvatarUpload::mime_for("me.png").to_string(),
                bytes: vec![0x89, 0x50, 0x4e, 0x47, 1, 2, 3],
            },
        )
        .await
        .unwrap();

    assert_eq!(
        response.avatar(),
        Some("https://cdn.example.org/avatars/u1/me.png")
    );
    let uploads = backend.state.uploads.lock().unwrap().clone();
    assert_eq!(
        uploads,
        vec![(
            "avatar".to_string(),
            "me.png".to_string(),
            "image/png".to_string(),
            7
        )]
    );
}
