//! # fmgr-api
//!
//! HTTP surface for fmgr. Every operation is mounted under `/api/fmgr/<name>`
//! or `/api/user/<name>`; mutations and array-input queries are `POST` with a
//! JSON body, scalar queries are `GET` with query-string input.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_state, run_server};
pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
