//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section, and every section has serde defaults so an empty file is a
//! valid configuration.

pub mod app;
pub mod auth;
pub mod database;
pub mod folders;
pub mod logging;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::auth::AuthConfig;
pub use self::database::{DatabaseConfig, StoreBackend};
pub use self::folders::FolderPolicyConfig;
pub use self::logging::LoggingConfig;

use crate::error::AppError;

/// Environment variable prefix for overrides (`FMGR__DATABASE__URL`).
pub const ENV_PREFIX: &str = "FMGR";

/// Root application configuration.
///
/// Top-level deserialization target for the merged TOML configuration
/// files (default.toml + environment overlay + `FMGR__*` variables).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Identity token settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Folder tree policy.
    #[serde(default)]
    pub folders: FolderPolicyConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from `config/default.toml` and `config/{env}.toml`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        Self::load_from("config", env)
    }

    /// Load configuration from a directory holding `default.toml` and an
    /// optional `{env}.toml` overlay, then apply `FMGR__*` variables.
    pub fn load_from(dir: &str, env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(&format!("{dir}/default")).required(false))
            .add_source(config::File::with_name(&format!("{dir}/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// In-memory configuration used by tests and local demos.
    pub fn in_memory() -> Self {
        let mut config = Self::default();
        config.database.backend = StoreBackend::Memory;
        config
    }
}
