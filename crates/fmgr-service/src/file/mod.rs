//! File record operations.

pub mod service;

pub use service::{CreateFileRequest, FileService};
