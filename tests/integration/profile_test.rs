//! Profile integration tests.

mod helpers;

use carebridge_core::ErrorKind;
use carebridge_core::traits::ToastLevel;
use carebridge_core::types::UserId;
use carebridge_entity::user::{FieldGroup, ProfileField};
use carebridge_service::ProfileController;
use helpers::{MockBackend, user};

async fn parent_backend() -> MockBackend {
    let backend = MockBackend::start_wrapped().await;
    backend.state.users.lock().unwrap().push(user("u1", "parent"));
    backend
}

#[tokio::test]
async fn test_edit_and_submit_parent_profile() {
    let backend = parent_backend().await;
    let (api, bus, toasts) = backend.harness();
    let controller = ProfileController::new(api, bus, toasts.clone());

    controller.load(&UserId::new("u1")).await.unwrap();
    assert_eq!(controller.visible_groups().await, vec![FieldGroup::Child]);

    controller
        .set_field(ProfileField::ChildName, "Ari")
        .await
        .unwrap();
    controller.set_field(ProfileField::ChildAge, "8").await.unwrap();
    let saved = controller.submit().await.unwrap();

    assert_eq!(saved.child_name.as_deref(), Some("Ari"));
    assert_eq!(saved.child_age, Some(8));
    let sent = backend.state.last_user_update.lock().unwrap().clone().unwrap();
    assert_eq!(sent["childAge"], serde_json::json!(8));
    assert_eq!(sent["email"], serde_json::json!("sam@example.org"));
    assert_eq!(controller.form().await.child_name.as_deref(), Some("Ari"));
    assert_eq!(
        toasts.messages(ToastLevel::Success),
        vec!["Profile updated successfully"]
    );
}

#[tokio::test]
async fn test_invalid_form_is_not_sent() {
    let backend = parent_backend().await;
    let (api, bus, toasts) = backend.harness();
    let controller = ProfileController::new(api, bus, toasts.clone());
    controller.load(&UserId::new("u1")).await.unwrap();

    controller
        .set_field(ProfileField::Email, "not-an-email")
        .await
        .unwrap();
    let err = controller.submit().await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::Validation);
    assert!(backend.state.last_user_update.lock().unwrap().is_none());
    assert_eq!(toasts.messages(ToastLevel::Error).len(), 1);
}

#[tokio::test]
async fn test_avatar_upload_keeps_pending_edits() {
    let backend = parent_backend().await;
    let (api, bus, toasts) = backend.harness();
    let controller = ProfileController::new(api, bus, toasts.clone());
    controller.load(&UserId::new("u1")).await.unwrap();
    controller
        .set_field(ProfileField::Bio, "Loves trains")
        .await
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("portrait.jpg");
    std::fs::write(&path, [0xff, 0xd8, 0xff, 0xe0]).unwrap();

    let url = controller.upload_avatar(&path).await.unwrap();
    assert_eq!(
        url.as_deref(),
        Some("https://cdn.example.org/avatars/u1/portrait.jpg")
    );
    assert_eq!(
        controller.profile().await.unwrap().avatar,
        url
    );
    assert_eq!(controller.form().await.bio.as_deref(), Some("Loves trains"));

    let uploads = backend.state.uploads.lock().unwrap().clone();
    assert_eq!(uploads[0].2, "image/jpeg");
    assert_eq!(uploads[0].3, 4);
}

#[tokio::test]
async fn test_unknown_user_is_reported() {
    let backend = parent_backend().await;
    let (api, bus, toasts) = backend.harness();
    let controller = ProfileController::new(api, bus, toasts.clone());

    let err = controller.load(&UserId::new("u404")).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
    assert!(controller.profile().await.is_none());
    assert_eq!(toasts.messages(ToastLevel::Error), vec!["User not found"]);
}
