//! Notification integration tests.

mod helpers;

use tokio::sync::broadcast;

use carebridge_core::events::notification::NotificationEvent;
use carebridge_core::events::{DomainEvent, EventPayload};
use carebridge_core::traits::ToastLevel;
use carebridge_core::types::NotificationId;
use carebridge_entity::notification::NotificationType;
use carebridge_service::{NotificationController, TypeFilter};
use helpers::{MockBackend, notification};

async fn seeded() -> MockBackend {
    let backend = MockBackend::start().await;
    backend.state.notifications.lock().unwrap().extend([
        notification("n1", "collaboration_request", false),
        notification("n2", "system", true),
        notification("n3", "system", false),
    ]);
    backend
}

async fn visible_ids(controller: &NotificationController) -> Vec<String> {
    controller
        .visible()
        .await
        .iter()
        .map(|n| n.id.to_string())
        .collect()
}

fn unread_counts(rx: &mut broadcast::Receiver<DomainEvent>) -> Vec<usize> {
    let mut counts = Vec::new();
    while let Ok(event) = rx.try_recv() {
        if let EventPayload::Notification(NotificationEvent::UnreadCountChanged { count }) =
            event.payload
        {
            counts.push(count);
        }
    }
    counts
}

#[tokio::test]
async fn test_load_and_mark_read_round_trip() {
    let backend = seeded().await;
    let (api, bus, toasts) = backend.harness();
    let mut rx = bus.subscribe();
    let controller = NotificationController::new(api, bus, toasts.clone());

    assert_eq!(controller.load().await.unwrap(), 3);
    assert_eq!(controller.unread_count().await, 2);

    controller
        .mark_read(&NotificationId::new("n1"))
        .await
        .unwrap();
    assert_eq!(controller.unread_count().await, 1);
    assert_eq!(
        backend.state.notifications.lock().unwrap()[0]["read"],
        serde_json::json!(true)
    );

    assert_eq!(unread_counts(&mut rx), vec![2, 1]);
    assert_eq!(
        toasts.messages(ToastLevel::Success),
        vec!["Notification marked as read"]
    );
}

#[tokio::test]
async fn test_mark_all_read_then_delete() {
    let backend = seeded().await;
    let (api, bus, toasts) = backend.harness();
    let mut rx = bus.subscribe();
    let controller = NotificationController::new(api, bus, toasts.clone());
    controller.load().await.unwrap();

    controller.mark_all_read().await.unwrap();
    assert_eq!(controller.unread_count().await, 0);

    controller.delete(&NotificationId::new("n2")).await.unwrap();
    let ids: Vec<String> = controller
        .all()
        .await
        .iter()
        .map(|n| n.id.to_string())
        .collect();
    assert_eq!(ids, vec!["n1", "n3"]);
    assert_eq!(backend.state.notifications.lock().unwrap().len(), 2);

    let deleted = std::iter::from_fn(|| rx.try_recv().ok()).any(|e| {
        matches!(
            e.payload,
            EventPayload::Notification(NotificationEvent::Deleted { ref notification_id })
                if notification_id.as_str() == "n2"
        )
    });
    assert!(deleted);
}

#[tokio::test]
async fn test_unknown_id_reports_server_message() {
    let backend = seeded().await;
    let (api, bus, toasts) = backend.harness();
    let controller = NotificationController::new(api, bus, toasts.clone());
    controller.load().await.unwrap();

    let err = controller
        .delete(&NotificationId::new("gone"))
        .await
        .unwrap_err();
    assert_eq!(err.message, "Notification not found");
    assert_eq!(controller.all().await.len(), 3);
    assert_eq!(
        toasts.messages(ToastLevel::Error),
        vec!["Notification not found"]
    );
}

#[tokio::test]
async fn test_filtered_view_over_wrapped_responses() {
    let backend = MockBackend::start_wrapped().await;
    backend.state.notifications.lock().unwrap().extend([
        notification("n1", "collaboration_request", false),
        notification("n2", "system", true),
        notification("n3", "system", false),
    ]);
    let (api, bus, toasts) = backend.harness();
    let controller = NotificationController::new(api, bus, toasts);
    controller.load().await.unwrap();

    controller.set_show_read(false).await;
    assert_eq!(visible_ids(&controller).await, vec!["n1", "n3"]);

    controller
        .set_type_filter(TypeFilter::Only(NotificationType::System))
        .await;
    assert_eq!(visible_ids(&controller).await, vec!["n3"]);
}
