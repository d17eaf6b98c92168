//! Route definitions for the fmgr HTTP API.
//!
//! Folder and file operations live under `/api/fmgr`, user lookups under
//! `/api/user`. Each operation gets its own path named after it.

use std::time::Duration;

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.config.server.request_timeout_seconds);
    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    let api_routes = Router::new()
        .nest("/fmgr", folder_routes().merge(file_routes()))
        .nest("/user", user_routes())
        .route("/health", get(handlers::health::health));

    Router::new()
        .nest("/api", api_routes)
        .layer(TimeoutLayer::new(timeout))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

fn folder_routes() -> Router<AppState> {
    Router::new()
        .route("/createFolder", post(handlers::folder::create_folder))
        .route("/updateFolder", post(handlers::folder::update_folder))
        .route("/deleteFolder", post(handlers::folder::delete_folder))
        .route("/getAllFolders", get(handlers::folder::get_all_folders))
        .route("/getSingleFolder", get(handlers::folder::get_single_folder))
}

fn file_routes() -> Router<AppState> {
    Router::new()
        .route("/createFile", post(handlers::file::create_file))
        .route("/updateFileName", post(handlers::file::update_file_name))
        .route("/deleteOneFile", post(handlers::file::delete_one_file))
        .route(
            "/deleteMultipleFiles",
            post(handlers::file::delete_multiple_files),
        )
        .route("/getAllFiles", get(handlers::file::get_all_files))
        .route(
            "/getAllFilesOfFolder",
            get(handlers::file::get_all_files_of_folder),
        )
        .route(
            "/getMultipleFilesByIds",
            post(handlers::file::get_multiple_files_by_ids),
        )
        .route("/getSingleFile", get(handlers::file::get_single_file))
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/getUser", get(handlers::user::get_user))
        .route("/getAllUsers", get(handlers::user::get_all_users))
}
