//! Stored bearer token CLI commands.

use clap::{Args, Subcommand};

use carebridge_client::{TokenClaims, TokenStore};
use carebridge_core::error::AppError;

use super::Context;
use crate::output::{self, OutputFormat};

/// Arguments for auth commands
#[derive(Debug, Args)]
pub struct AuthArgs {
    /// Auth subcommand
    #[command(subcommand)]
    pub command: AuthCommand,
}

/// Auth subcommands
#[derive(Debug, Subcommand)]
pub enum AuthCommand {
    /// Store a bearer token issued by the platform
    SetToken {
        /// The token
        token: String,
    },
    /// Forget the stored token
    Clear,
    /// Show who the active token belongs to
    Whoami,
}

/// Execute auth commands
pub async fn execute(args: &AuthArgs, ctx: &Context) -> Result<(), AppError> {
    match &args.command {
        AuthCommand::SetToken { token } => {
            let token = token.trim();
            // Refuse obvious garbage; the signature is the server's business.
            let claims = TokenClaims::decode_unverified(token)?;
            if claims.is_expired() {
                output::print_warning("Token has already expired");
            }
            ctx.token_file.save(token).await?;
            output::print_success(&format!(
                "Token saved to {}",
                ctx.token_file.path().display()
            ));
        }
        AuthCommand::Clear => {
            ctx.token_file.clear().await?;
            output::print_success("Token cleared");
        }
        AuthCommand::Whoami => {
            let Some(claims) = ctx.claims().await? else {
                return Err(AppError::authentication("No token stored"));
            };
            let expires = claims
                .expires_at()
                .map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
                .unwrap_or_else(|| "-".to_string());

            match ctx.format {
                OutputFormat::Json => output::print_json(&serde_json::json!({
                    "id": claims.id,
                    "role": claims.role,
                    "expiresAt": claims.expires_at(),
                    "expired": claims.is_expired(),
                })),
                OutputFormat::Table => {
                    output::print_kv("User", claims.id.as_deref().unwrap_or("-"));
                    output::print_kv("Role", claims.role.as_deref().unwrap_or("-"));
                    output::print_kv("Expires", &expires);
                    if claims.is_expired() {
                        output::print_warning("Token has expired; sign in again");
                    }
                }
            }
        }
    }

    Ok(())
}
