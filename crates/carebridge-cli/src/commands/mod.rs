//! CLI command definitions and dispatch.

pub mod auth;
pub mod config;
pub mod course;
pub mod notifications;
pub mod profile;
pub mod requests;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use carebridge_client::{
    FileTokenStore, HttpPlatformApi, MemoryTokenStore, PlatformApi, TokenClaims, TokenStore,
};
use carebridge_core::config::AppConfig;
use carebridge_core::error::AppError;
use carebridge_core::events::EventBus;
use carebridge_core::types::UserId;
use carebridge_service::{
    CollaborationController, CoursePlayer, NotificationController, NotificationFilter,
    ProfileController, ToastBuffer,
};

use crate::output::{self, OutputFormat};

/// CareBridge: command-line access to the autism support platform
#[derive(Debug, Parser)]
#[command(name = "carebridge", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Bearer token to use instead of the stored one
    #[arg(long, env = "CAREBRIDGE_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Notification list and unread count
    Notifications(notifications::NotificationsArgs),
    /// Course outline, lessons and progress
    Course(course::CourseArgs),
    /// Profile viewing and editing
    Profile(profile::ProfileArgs),
    /// Collaboration request review
    Requests(requests::RequestsArgs),
    /// Stored bearer token
    Auth(auth::AuthArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command, printing toasts and errors.
    pub async fn execute(&self) -> Result<(), AppError> {
        let toasts = Arc::new(ToastBuffer::new());
        let result = self.dispatch(&toasts).await;

        let error_shown = output::print_toasts(&toasts.drain());
        if let Err(e) = &result
            && !error_shown
        {
            output::print_error(&e.user_message());
        }
        result
    }

    async fn dispatch(&self, toasts: &Arc<ToastBuffer>) -> Result<(), AppError> {
        if let Commands::Config(args) = &self.command {
            return config::execute(args, &self.config, self.format).await;
        }

        let ctx = Context::new(self, toasts.clone())?;
        match &self.command {
            Commands::Notifications(args) => notifications::execute(args, &ctx).await,
            Commands::Course(args) => course::execute(args, &ctx).await,
            Commands::Profile(args) => profile::execute(args, &ctx).await,
            Commands::Requests(args) => requests::execute(args, &ctx).await,
            Commands::Auth(args) => auth::execute(args, &ctx).await,
            Commands::Config(_) => Ok(()),
        }
    }
}

/// Helper: load and validate configuration from file
pub fn load_config(config_path: &str) -> Result<AppConfig, AppError> {
    let config = AppConfig::from_file(config_path)?;
    config.validate()?;
    Ok(config)
}

/// Everything a command needs to talk to the backend.
#[derive(Debug)]
pub struct Context {
    /// Loaded configuration.
    pub config: AppConfig,
    /// Selected output format.
    pub format: OutputFormat,
    /// Token source for the HTTP client.
    pub tokens: Arc<dyn TokenStore>,
    /// The stored token file, even when `--token` overrides it.
    pub token_file: FileTokenStore,
    /// Backend client.
    pub api: Arc<dyn PlatformApi>,
    /// Event bus shared by the controllers of one invocation.
    pub bus: EventBus,
    /// Toasts collected during the command.
    pub toasts: Arc<ToastBuffer>,
}

impl Context {
    fn new(cli: &Cli, toasts: Arc<ToastBuffer>) -> Result<Self, AppError> {
        let config = load_config(&cli.config)?;
        let token_file = FileTokenStore::new(&config.auth.token_file);
        let tokens: Arc<dyn TokenStore> = match &cli.token {
            Some(token) => Arc::new(MemoryTokenStore::with_token(token.clone())),
            None => Arc::new(token_file.clone()),
        };
        let api: Arc<dyn PlatformApi> = Arc::new(HttpPlatformApi::new(&config.api, tokens.clone())?);
        let bus = EventBus::new(config.notifications.event_buffer);

        Ok(Self {
            config,
            format: cli.format,
            tokens,
            token_file,
            api,
            bus,
            toasts,
        })
    }

    /// Notification controller honouring the configured read-visibility default.
    pub fn notifications(&self) -> NotificationController {
        let filter = NotificationFilter {
            show_read: self.config.notifications.show_read_default,
            ..NotificationFilter::default()
        };
        NotificationController::with_filter(
            self.api.clone(),
            self.bus.clone(),
            self.toasts.clone(),
            filter,
        )
    }

    /// Course player.
    pub fn course_player(&self) -> CoursePlayer {
        CoursePlayer::new(self.api.clone(), self.bus.clone(), self.toasts.clone())
    }

    /// Profile controller.
    pub fn profile(&self) -> ProfileController {
        ProfileController::new(self.api.clone(), self.bus.clone(), self.toasts.clone())
    }

    /// Collaboration review controller.
    pub fn collaboration(&self) -> CollaborationController {
        CollaborationController::new(self.api.clone(), self.bus.clone(), self.toasts.clone())
    }

    /// Claims of the active token, if any.
    pub async fn claims(&self) -> Result<Option<TokenClaims>, AppError> {
        match self.tokens.load().await? {
            Some(token) => TokenClaims::decode_unverified(&token).map(Some),
            None => Ok(None),
        }
    }

    /// The explicit user, or the token's subject.
    pub async fn resolve_user(&self, explicit: Option<&str>) -> Result<UserId, AppError> {
        if let Some(id) = explicit {
            return id.parse();
        }
        self.claims()
            .await?
            .and_then(|c| c.user_id())
            .ok_or_else(|| {
                AppError::authentication("No user given and no signed-in user in the stored token")
            })
    }
}
