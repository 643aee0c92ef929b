use clap::Subcommand;
use serde_json::json;

use crate::auth::Credentials;
use crate::cli::utils::{output_error, output_success, security_config};
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum PasswordCommands {
    #[command(about = "Hash a password with the configured Argon2 cost")]
    Hash {
        #[arg(help = "Plaintext password")]
        password: String,
    },

    #[command(about = "Check a password against a stored digest")]
    Verify {
        #[arg(help = "Stored Argon2 digest")]
        digest: String,
        #[arg(help = "Plaintext password")]
        password: String,
    },
}

pub async fn handle(cmd: PasswordCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let credentials = Credentials::from_config(&security_config())?;

    match cmd {
        PasswordCommands::Hash { password } => {
            let digest = credentials.hash_blocking(password).await?;
            output_success(output_format, "Password hashed", Some(json!({ "digest": digest })))
        }
        PasswordCommands::Verify { digest, password } => {
            if credentials.verify_blocking(digest, password).await? {
                output_success(output_format, "Password matches", None)
            } else {
                output_error(output_format, "Password does not match")?;
                anyhow::bail!("password mismatch")
            }
        }
    }
}
