//! Collaboration request CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use carebridge_core::error::AppError;
use carebridge_core::types::CollaborationRequestId;
use carebridge_entity::collaboration::{CollaborationRequest, Decision, RequestStatus};
use carebridge_service::CollaborationController;

use super::Context;
use crate::output::{self, OutputFormat};

/// Arguments for request commands
#[derive(Debug, Args)]
pub struct RequestsArgs {
    /// Request subcommand
    #[command(subcommand)]
    pub command: RequestsCommand,
}

/// Request subcommands
#[derive(Debug, Subcommand)]
pub enum RequestsCommand {
    /// List collaboration requests
    List {
        /// Every request on the platform (admin only)
        #[arg(short, long)]
        all: bool,
        /// Filter by status
        #[arg(short, long)]
        status: Option<RequestStatus>,
    },
    /// Approve a pending request (admin only)
    Approve {
        /// Request ID
        id: CollaborationRequestId,
        /// Note sent with the decision
        #[arg(short, long)]
        response: Option<String>,
    },
    /// Reject a pending request (admin only)
    Reject {
        /// Request ID
        id: CollaborationRequestId,
        /// Note sent with the decision
        #[arg(short, long)]
        response: Option<String>,
    },
}

/// Request display row for table output
#[derive(Debug, Serialize, Tabled)]
struct RequestRow {
    /// Request ID
    id: String,
    /// Requesting professional
    requester: String,
    /// Student concerned
    student: String,
    /// Request type
    #[tabled(rename = "type")]
    request_type: String,
    /// Status
    status: String,
    /// Admin response
    response: String,
    /// Created at
    created_at: String,
}

impl From<&CollaborationRequest> for RequestRow {
    fn from(r: &CollaborationRequest) -> Self {
        Self {
            id: r.id.to_string(),
            requester: r.requester.label().to_string(),
            student: r.student.label().to_string(),
            request_type: r.request_type.clone(),
            status: r.status.to_string(),
            response: r.admin_response.clone().unwrap_or_default(),
            created_at: r
                .created_at
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default(),
        }
    }
}

/// Execute request commands
pub async fn execute(args: &RequestsArgs, ctx: &Context) -> Result<(), AppError> {
    let controller = ctx.collaboration();

    match &args.command {
        RequestsCommand::List { all, status } => {
            if *all {
                controller.load_all().await?;
            } else {
                controller.load_mine().await?;
            }

            let requests = match status {
                Some(status) => controller.with_status(*status).await,
                None => controller.requests().await,
            };
            match ctx.format {
                OutputFormat::Json => output::print_json(&requests),
                OutputFormat::Table => {
                    let rows: Vec<RequestRow> = requests.iter().map(Into::into).collect();
                    output::print_list(&rows, ctx.format);
                }
            }
        }
        RequestsCommand::Approve { id, response } => {
            decide(&controller, ctx.format, id, Decision::Approve, response.clone()).await?;
        }
        RequestsCommand::Reject { id, response } => {
            decide(&controller, ctx.format, id, Decision::Reject, response.clone()).await?;
        }
    }

    Ok(())
}

async fn decide(
    controller: &CollaborationController,
    format: OutputFormat,
    id: &CollaborationRequestId,
    decision: Decision,
    response: Option<String>,
) -> Result<(), AppError> {
    // Load first so an already-decided request is refused locally.
    controller.load_all().await?;
    let decided = controller.decide(id, decision, response).await?;

    if format == OutputFormat::Json {
        output::print_json(&decided);
    }
    Ok(())
}
