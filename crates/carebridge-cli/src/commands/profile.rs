//! Profile CLI commands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

use carebridge_core::error::AppError;
use carebridge_entity::user::{ProfileField, UserProfile};
use carebridge_service::profile::visible_fields_for;

use super::Context;
use crate::output::{self, OutputFormat};

/// Arguments for profile commands
#[derive(Debug, Args)]
pub struct ProfileArgs {
    /// Profile subcommand
    #[command(subcommand)]
    pub command: ProfileCommand,
}

/// Profile subcommands
#[derive(Debug, Subcommand)]
pub enum ProfileCommand {
    /// Show the fields relevant to the user's role
    Show {
        /// User ID (defaults to the signed-in user)
        user: Option<String>,
        /// Also show fields hidden for this role
        #[arg(long)]
        all: bool,
    },
    /// Edit fields and save
    Update {
        /// User ID (defaults to the signed-in user)
        user: Option<String>,
        /// Field assignment, e.g. --set childAge=8 (repeatable)
        #[arg(short, long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment, required = true)]
        assignments: Vec<(ProfileField, String)>,
    },
    /// Upload an avatar image
    Avatar {
        /// Image file
        file: PathBuf,
        /// User ID (defaults to the signed-in user)
        #[arg(short, long)]
        user: Option<String>,
    },
}

fn parse_assignment(raw: &str) -> Result<(ProfileField, String), AppError> {
    let (field, value) = raw
        .split_once('=')
        .ok_or_else(|| AppError::validation(format!("Expected FIELD=VALUE, got '{raw}'")))?;
    Ok((field.parse()?, value.to_string()))
}

/// Execute profile commands
pub async fn execute(args: &ProfileArgs, ctx: &Context) -> Result<(), AppError> {
    let controller = ctx.profile();

    match &args.command {
        ProfileCommand::Show { user, all } => {
            let user_id = ctx.resolve_user(user.as_deref()).await?;
            let profile = controller.load(&user_id).await?;
            print_profile(&profile, *all, ctx.format);
        }
        ProfileCommand::Update { user, assignments } => {
            let user_id = ctx.resolve_user(user.as_deref()).await?;
            controller.load(&user_id).await?;

            let visible = controller.visible_fields().await;
            for (field, value) in assignments {
                if !visible.contains(field) {
                    output::print_warning(&format!(
                        "{} is not shown for this role; it is saved anyway",
                        field.label()
                    ));
                }
                controller.set_field(*field, value).await?;
            }

            let saved = controller.submit().await?;
            print_profile(&saved, false, ctx.format);
        }
        ProfileCommand::Avatar { file, user } => {
            let user_id = ctx.resolve_user(user.as_deref()).await?;
            controller.load(&user_id).await?;
            if let Some(url) = controller.upload_avatar(file).await? {
                output::print_kv("Avatar", &url);
            }
        }
    }

    Ok(())
}

fn print_profile(profile: &UserProfile, all: bool, format: OutputFormat) {
    if format == OutputFormat::Json {
        output::print_json(profile);
        return;
    }

    let fields = if all {
        ProfileField::ALL.to_vec()
    } else {
        visible_fields_for(profile.role)
    };

    output::print_kv("ID", profile.id.as_str());
    output::print_kv("Role", profile.role.as_str());
    for field in fields {
        let value = profile.value(field).unwrap_or_else(|| "-".to_string());
        output::print_kv(field.label(), &value);
    }
    if let Some(avatar) = &profile.avatar {
        output::print_kv("Avatar", avatar);
    }
}
