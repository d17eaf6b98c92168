//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use fmgr_auth::JwtDecoder;
use fmgr_core::config::AppConfig;
use fmgr_database::Stores;
use fmgr_service::{FileService, FolderService, ModificationLog, UserService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Store handles (PostgreSQL or in-memory)
    pub stores: Stores,
    /// Identity token validator
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Folder service
    pub folder_service: Arc<FolderService>,
    /// File service
    pub file_service: Arc<FileService>,
    /// User service
    pub user_service: Arc<UserService>,
}

impl AppState {
    /// Wire services over an opened set of stores.
    pub fn new(config: AppConfig, stores: Stores) -> Self {
        let log = ModificationLog::new(stores.modifications.clone());
        let policy = config.folders.clone();

        let folder_service = Arc::new(FolderService::new(
            stores.folders.clone(),
            stores.files.clone(),
            policy.clone(),
        ));
        let file_service = Arc::new(FileService::new(
            stores.files.clone(),
            stores.folders.clone(),
            log,
            policy,
        ));
        let user_service = Arc::new(UserService::new(stores.users.clone()));
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));

        Self {
            config: Arc::new(config),
            stores,
            jwt_decoder,
            folder_service,
            file_service,
            user_service,
        }
    }
}
