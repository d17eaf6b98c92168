//! # fmgr-service
//!
//! Business logic for fmgr. Each service works against the store traits
//! from `fmgr-database`, so the same code runs on PostgreSQL and on the
//! in-memory store.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod context;
pub mod file;
pub mod folder;
pub mod modification;
pub mod user;

#[cfg(test)]
mod test_support;

pub use context::RequestContext;
pub use file::{CreateFileRequest, FileService};
pub use folder::{CreateFolderRequest, FolderService};
pub use modification::ModificationLog;
pub use user::UserService;
