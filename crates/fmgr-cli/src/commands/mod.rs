//! CLI command definitions and dispatch.

pub mod config;
pub mod migrate;
pub mod token;

use clap::{Parser, Subcommand};

use fmgr_core::config::AppConfig;
use fmgr_core::error::AppError;

/// fmgr: folder and file metadata service
#[derive(Debug, Parser)]
#[command(name = "fmgr", version, about, long_about = None)]
pub struct Cli {
    /// Directory holding default.toml and environment overlays
    #[arg(short, long, default_value = "config")]
    pub config_dir: String,

    /// Environment overlay to apply (`{config_dir}/{env}.toml`)
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Development identity tokens
    Token(token::TokenArgs),
    /// Configuration inspection
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = AppConfig::load_from(&self.config_dir, &self.env)?;
        match &self.command {
            Commands::Migrate(args) => migrate::execute(args, &config).await,
            Commands::Token(args) => token::execute(args, &config),
            Commands::Config(args) => config::execute(args, &config),
        }
    }
}
