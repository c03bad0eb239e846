//! Notification CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use carebridge_core::error::AppError;
use carebridge_core::types::NotificationId;
use carebridge_entity::notification::Notification;
use carebridge_service::TypeFilter;

use super::Context;
use crate::output::{self, OutputFormat};

/// Arguments for notification commands
#[derive(Debug, Args)]
pub struct NotificationsArgs {
    /// Notification subcommand
    #[command(subcommand)]
    pub command: NotificationsCommand,
}

/// Notification subcommands
#[derive(Debug, Subcommand)]
pub enum NotificationsCommand {
    /// List notifications
    List {
        /// Only this type (e.g. course_activity, or "all")
        #[arg(short = 't', long = "type", default_value = "all")]
        kind: TypeFilter,
        /// Hide notifications already read
        #[arg(short, long)]
        unread_only: bool,
    },
    /// Mark one notification as read
    Read {
        /// Notification ID
        id: NotificationId,
    },
    /// Mark every notification as read
    ReadAll,
    /// Delete a notification
    Delete {
        /// Notification ID
        id: NotificationId,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Show the unread count
    Count,
}

/// Notification display row for table output
#[derive(Debug, Serialize, Tabled)]
struct NotificationRow {
    /// Notification ID
    id: String,
    /// Unread marker
    #[tabled(rename = "")]
    unread: &'static str,
    /// Type
    #[tabled(rename = "type")]
    kind: String,
    /// Title
    title: String,
    /// Message
    message: String,
    /// Created at
    created_at: String,
}

impl From<&Notification> for NotificationRow {
    fn from(n: &Notification) -> Self {
        Self {
            id: n.id.to_string(),
            unread: if n.read { "" } else { "●" },
            kind: n.kind.label().to_string(),
            title: n.title.clone(),
            message: n.message.clone(),
            created_at: n
                .created_at
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default(),
        }
    }
}

/// Execute notification commands
pub async fn execute(args: &NotificationsArgs, ctx: &Context) -> Result<(), AppError> {
    let controller = ctx.notifications();

    match &args.command {
        NotificationsCommand::List { kind, unread_only } => {
            controller.load().await?;
            controller.set_type_filter(*kind).await;
            if *unread_only {
                controller.set_show_read(false).await;
            }

            let visible = controller.visible().await;
            match ctx.format {
                OutputFormat::Json => output::print_json(&visible),
                OutputFormat::Table => {
                    let rows: Vec<NotificationRow> = visible.iter().map(Into::into).collect();
                    output::print_list(&rows, ctx.format);
                    output::print_kv("Unread", &controller.unread_count().await.to_string());
                }
            }
        }
        NotificationsCommand::Read { id } => {
            controller.mark_read(id).await?;
        }
        NotificationsCommand::ReadAll => {
            controller.mark_all_read().await?;
        }
        NotificationsCommand::Delete { id, yes } => {
            if !yes {
                let confirm = dialoguer::Confirm::new()
                    .with_prompt(format!("Delete notification {id}?"))
                    .default(false)
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {e}")))?;
                if !confirm {
                    output::print_warning("Cancelled");
                    return Ok(());
                }
            }
            controller.delete(id).await?;
        }
        NotificationsCommand::Count => {
            controller.load().await?;
            let count = controller.unread_count().await;
            match ctx.format {
                OutputFormat::Json => output::print_json(&serde_json::json!({ "unread": count })),
                OutputFormat::Table => println!("{count}"),
            }
        }
    }

    Ok(())
}
