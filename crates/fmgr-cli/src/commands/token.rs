//! Issue identity tokens signed with the configured secret, for local
//! development against a running server.

use clap::{Args, Subcommand};

use fmgr_auth::JwtEncoder;
use fmgr_core::config::AppConfig;
use fmgr_core::error::AppError;
use fmgr_core::types::UserId;
use fmgr_entity::user::Identity;

/// Arguments for the token command
#[derive(Debug, Args)]
pub struct TokenArgs {
    /// Token subcommand
    #[command(subcommand)]
    pub command: TokenCommand,
}

/// Token subcommands
#[derive(Debug, Subcommand)]
pub enum TokenCommand {
    /// Sign a bearer token for an identity
    Issue {
        /// User id (token subject)
        #[arg(long)]
        id: String,
        /// Email address
        #[arg(long)]
        email: String,
        /// Display name
        #[arg(long)]
        name: Option<String>,
        /// Avatar URL
        #[arg(long)]
        image: Option<String>,
        /// Lifetime in minutes; defaults to `auth.token_ttl_minutes`
        #[arg(long)]
        ttl_minutes: Option<i64>,
    },
}

/// Execute token commands
pub fn execute(args: &TokenArgs, config: &AppConfig) -> Result<(), AppError> {
    match &args.command {
        TokenCommand::Issue {
            id,
            email,
            name,
            image,
            ttl_minutes,
        } => {
            let identity = Identity {
                id: UserId::new(id.as_str()),
                name: name.clone(),
                email: email.clone(),
                image: image.clone(),
            };

            let encoder = JwtEncoder::new(&config.auth);
            let token = match ttl_minutes {
                Some(minutes) if *minutes <= 0 => {
                    return Err(AppError::validation("--ttl-minutes must be positive"));
                }
                Some(minutes) => {
                    encoder.issue_with_ttl(&identity, chrono::Duration::minutes(*minutes))?
                }
                None => encoder.issue(&identity)?,
            };

            println!("{}", token);
        }
    }

    Ok(())
}
