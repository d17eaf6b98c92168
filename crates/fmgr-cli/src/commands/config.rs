//! Configuration inspection commands.

use clap::{Args, Subcommand};

use fmgr_core::config::AppConfig;
use fmgr_core::error::AppError;
use fmgr_database::connection::mask_password;

use crate::output;

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the merged configuration with secrets masked
    Show,
    /// Check that the configuration loads and summarize it
    Validate,
}

/// Execute config commands
pub fn execute(args: &ConfigArgs, config: &AppConfig) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => output::print_json(&redacted(config)),
        ConfigCommand::Validate => {
            output::print_success("Configuration is valid");
            println!("  Server: {}:{}", config.server.host, config.server.port);
            println!("  Backend: {}", config.database.backend);
            println!("  Database: {}", mask_password(&config.database.url));
            println!(
                "  Folders: recursive_delete={} enforce_ownership={}",
                config.folders.recursive_delete, config.folders.enforce_ownership
            );
        }
    }
    Ok(())
}

/// A copy safe to print.
fn redacted(config: &AppConfig) -> AppConfig {
    let mut copy = config.clone();
    copy.database.url = mask_password(&copy.database.url);
    copy.auth.jwt_secret = "****".to_string();
    copy
}
