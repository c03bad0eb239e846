//! CareBridge unread watcher
//!
//! Background process that keeps the notification list fresh and reports
//! unread-count changes, the headless counterpart of the dashboard badge.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, fmt};

use carebridge_client::{FileTokenStore, HttpPlatformApi, PlatformApi, TokenStore};
use carebridge_core::config::AppConfig;
use carebridge_core::error::AppError;
use carebridge_core::events::EventBus;
use carebridge_service::{
    NotificationController, NotificationFilter, NotificationPoller, TracingToaster, UnreadBadge,
};

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Watcher error: {}", e);
        std::process::exit(1);
    }
}

/// Load layered configuration for the environment named by `CAREBRIDGE_ENV`
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("CAREBRIDGE_ENV").unwrap_or_else(|_| "local".to_string());
    let config = AppConfig::load(&env)?;
    config.validate()?;
    Ok(config)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    if config.logging.is_json() {
        fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(true)
            .init();
    } else {
        fmt()
            .pretty()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting CareBridge watcher v{}", env!("CARGO_PKG_VERSION"));

    let tokens: Arc<dyn TokenStore> = Arc::new(FileTokenStore::new(&config.auth.token_file));
    if tokens.load().await?.is_none() {
        tracing::warn!(
            token_file = %config.auth.token_file,
            "No token stored; requests will be rejected until one is set"
        );
    }

    let api: Arc<dyn PlatformApi> = Arc::new(HttpPlatformApi::new(&config.api, tokens)?);
    let bus = EventBus::new(config.notifications.event_buffer);

    let filter = NotificationFilter {
        show_read: config.notifications.show_read_default,
        ..NotificationFilter::default()
    };
    let controller = Arc::new(NotificationController::with_filter(
        api,
        bus.clone(),
        Arc::new(TracingToaster),
        filter,
    ));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let badge = Arc::new(UnreadBadge::new());
    let badge_handle = tokio::spawn(badge.run(bus.subscribe(), shutdown_rx.clone(), |count| {
        tracing::info!(count, "Unread notifications");
    }));

    let poller = NotificationPoller::new(
        controller,
        Duration::from_secs(config.notifications.poll_interval_seconds),
    );
    tracing::info!(
        interval_secs = poller.interval().as_secs(),
        backend = %config.api.base_url,
        "Polling notifications"
    );
    let poller_cancel = shutdown_rx.clone();
    let poller_handle = tokio::spawn(async move {
        poller.run(poller_cancel).await;
    });

    shutdown_signal().await;
    tracing::info!("Shutdown signal received, stopping watcher...");
    let _ = shutdown_tx.send(true);

    for handle in [poller_handle, badge_handle] {
        if tokio::time::timeout(Duration::from_secs(10), handle)
            .await
            .is_err()
        {
            tracing::warn!("Background task did not stop in time");
        }
    }

    tracing::info!("CareBridge watcher stopped");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
