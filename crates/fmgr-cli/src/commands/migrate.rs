//! Database migration commands.

use clap::{Args, Subcommand};

use fmgr_core::config::{AppConfig, StoreBackend};
use fmgr_core::error::AppError;
use fmgr_database::DatabasePool;
use fmgr_database::migration::run_migrations;

use crate::output;

/// Arguments for the migrate command
#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Migration subcommand
    #[command(subcommand)]
    pub command: MigrateCommand,
}

/// Migration subcommands
#[derive(Debug, Subcommand)]
pub enum MigrateCommand {
    /// Run all pending migrations
    Run,
}

/// Execute migration commands
pub async fn execute(args: &MigrateArgs, config: &AppConfig) -> Result<(), AppError> {
    match &args.command {
        MigrateCommand::Run => {
            if config.database.backend == StoreBackend::Memory {
                return Err(AppError::configuration(
                    "The memory backend has no schema to migrate",
                ));
            }

            println!("Running database migrations...");
            let pool = DatabasePool::connect(&config.database).await?;
            let result = run_migrations(pool.pool()).await;
            pool.close().await;
            result?;
            output::print_success("All migrations applied successfully.");
        }
    }

    Ok(())
}
