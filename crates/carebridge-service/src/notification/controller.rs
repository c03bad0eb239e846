//! Notification list state and mutations.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};

use carebridge_client::PlatformApi;
use carebridge_core::AppError;
use carebridge_core::events::{EventBus, NotificationEvent};
use carebridge_core::result::AppResult;
use carebridge_core::traits::Toaster;
use carebridge_core::types::NotificationId;
use carebridge_entity::notification::Notification;

use super::filter::{NotificationFilter, TypeFilter};
use crate::state::LoadState;

/// Holds the caller's notifications and applies read/delete mutations.
///
/// The local list changes only after the backend confirms a mutation.
/// After every list change the unread count is recomputed and published on
/// the event bus, so badge listeners never read this controller's state.
#[derive(Debug)]
pub struct NotificationController {
    /// Backend.
    api: Arc<dyn PlatformApi>,
    /// Where unread-count changes are published.
    bus: EventBus,
    /// Where failures and confirmations are shown.
    toaster: Arc<dyn Toaster>,
    /// List and filter state.
    state: RwLock<NotificationState>,
}

#[derive(Debug, Default)]
struct NotificationState {
    list: LoadState<Vec<Notification>>,
    filter: NotificationFilter,
}

impl NotificationState {
    fn unread_count(&self) -> usize {
        self.list
            .value()
            .map(|items| items.iter().filter(|n| n.is_unread()).count())
            .unwrap_or(0)
    }
}

impl NotificationController {
    /// Creates a new notification controller.
    pub fn new(api: Arc<dyn PlatformApi>, bus: EventBus, toaster: Arc<dyn Toaster>) -> Self {
        Self::with_filter(api, bus, toaster, NotificationFilter::default())
    }

    /// Creates a controller starting with the given filter.
    pub fn with_filter(
        api: Arc<dyn PlatformApi>,
        bus: EventBus,
        toaster: Arc<dyn Toaster>,
        filter: NotificationFilter,
    ) -> Self {
        Self {
            api,
            bus,
            toaster,
            state: RwLock::new(NotificationState {
                list: LoadState::NotLoaded,
                filter,
            }),
        }
    }

    /// Loads the caller's notifications. Same as [`Self::refresh`].
    pub async fn load(&self) -> AppResult<usize> {
        self.refresh().await
    }

    /// Re-fetches the list, replacing local state. Returns the list length.
    pub async fn refresh(&self) -> AppResult<usize> {
        self.state.write().await.list.begin();

        match self.api.list_notifications().await {
            Ok(items) => {
                let len = items.len();
                let unread = {
                    let mut state = self.state.write().await;
                    state.list.finish(items);
                    state.unread_count()
                };
                self.publish_unread(unread);
                Ok(len)
            }
            Err(e) => {
                self.state.write().await.list.abort();
                self.fail("Failed to load notifications", e)
            }
        }
    }

    /// Marks one notification as read.
    pub async fn mark_read(&self, id: &NotificationId) -> AppResult<()> {
        if let Err(e) = self.api.mark_notification_read(id).await {
            return self.fail("Failed to mark notification as read", e);
        }

        let unread = {
            let mut state = self.state.write().await;
            if let Some(item) = state
                .list
                .value_mut()
                .and_then(|items| items.iter_mut().find(|n| &n.id == id))
            {
                item.read = true;
            }
            state.unread_count()
        };
        self.publish_unread(unread);

        info!(notification_id = %id, "Notification marked as read");
        self.toaster.success("Notification marked as read");
        Ok(())
    }

    /// Marks every notification as read.
    pub async fn mark_all_read(&self) -> AppResult<()> {
        if let Err(e) = self.api.mark_all_notifications_read().await {
            return self.fail("Failed to mark all notifications as read", e);
        }

        let unread = {
            let mut state = self.state.write().await;
            if let Some(items) = state.list.value_mut() {
                for item in items.iter_mut() {
                    item.read = true;
                }
            }
            state.unread_count()
        };
        self.publish_unread(unread);

        info!("All notifications marked as read");
        self.toaster.success("All notifications marked as read");
        Ok(())
    }

    /// Deletes one notification.
    pub async fn delete(&self, id: &NotificationId) -> AppResult<()> {
        if let Err(e) = self.api.delete_notification(id).await {
            return self.fail("Failed to delete notification", e);
        }

        let unread = {
            let mut state = self.state.write().await;
            if let Some(items) = state.list.value_mut() {
                items.retain(|n| &n.id != id);
            }
            state.unread_count()
        };
        self.bus.publish(NotificationEvent::Deleted {
            notification_id: id.clone(),
        });
        self.publish_unread(unread);

        info!(notification_id = %id, "Notification deleted");
        self.toaster.success("Notification deleted");
        Ok(())
    }

    /// Sets the type predicate.
    pub async fn set_type_filter(&self, kind: TypeFilter) {
        self.state.write().await.filter.kind = kind;
    }

    /// Sets whether read notifications are shown.
    pub async fn set_show_read(&self, show_read: bool) {
        self.state.write().await.filter.show_read = show_read;
    }

    /// The active filter.
    pub async fn filter(&self) -> NotificationFilter {
        self.state.read().await.filter
    }

    /// Notifications passing the active filter, in list order.
    pub async fn visible(&self) -> Vec<Notification> {
        let state = self.state.read().await;
        match state.list.value() {
            Some(items) => state.filter.apply(items).into_iter().cloned().collect(),
            None => Vec::new(),
        }
    }

    /// Every loaded notification, unfiltered.
    pub async fn all(&self) -> Vec<Notification> {
        self.state
            .read()
            .await
            .list
            .value()
            .cloned()
            .unwrap_or_default()
    }

    /// Looks up one loaded notification.
    pub async fn get(&self, id: &NotificationId) -> Option<Notification> {
        self.state
            .read()
            .await
            .list
            .value()
            .and_then(|items| items.iter().find(|n| &n.id == id).cloned())
    }

    /// Number of loaded notifications with the read flag unset.
    pub async fn unread_count(&self) -> usize {
        self.state.read().await.unread_count()
    }

    /// Check whether the list has been loaded.
    pub async fn is_loaded(&self) -> bool {
        self.state.read().await.list.is_loaded()
    }

    fn publish_unread(&self, count: usize) {
        self.bus
            .publish(NotificationEvent::UnreadCountChanged { count });
    }

    fn fail<T>(&self, context: &str, err: AppError) -> AppResult<T> {
        warn!(error = %err, "{context}");
        self.toaster.error(&err.user_message());
        Err(err)
    }
}
