use anyhow::Context;
use clap::Subcommand;
use serde_json::json;

use crate::auth::{AuthError, TokenService};
use crate::cli::utils::{output_error, output_success, security_config};
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum TokenCommands {
    #[command(about = "Issue a token for a user id")]
    Issue {
        #[arg(help = "User id to put in the token")]
        user_id: String,
        #[arg(long, help = "Lifetime in hours (defaults to SECURITY_JWT_EXPIRY_HOURS)")]
        hours: Option<u64>,
    },

    #[command(about = "Check a token and print its user id")]
    Verify {
        #[arg(help = "Token, with or without the Bearer prefix")]
        token: String,
    },
}

pub fn handle(cmd: TokenCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let security = security_config();

    match cmd {
        TokenCommands::Issue { user_id, hours } => {
            let tokens = TokenService::new(&security.jwt_secret, hours.unwrap_or(security.jwt_expiry_hours))
                .context("cannot issue tokens")?;
            let token = tokens.issue(&user_id)?;
            output_success(output_format, "Token issued", Some(json!({ "token": token })))
        }
        TokenCommands::Verify { token } => {
            let tokens = TokenService::from_config(&security).context("cannot verify tokens")?;
            let token = token.strip_prefix("Bearer ").unwrap_or(&token).trim();
            match tokens.validate(token) {
                Ok(user_id) => output_success(output_format, "Token is valid", Some(json!({ "user_id": user_id }))),
                Err(e @ (AuthError::Invalid(_) | AuthError::MissingClaim)) => {
                    output_error(output_format, &e.to_string())?;
                    anyhow::bail!("token rejected")
                }
                Err(e) => Err(e.into()),
            }
        }
    }
}
