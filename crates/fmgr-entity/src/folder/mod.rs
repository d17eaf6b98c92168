//! Folder domain entities.

pub mod detail;
pub mod model;

pub use detail::FolderDetail;
pub use model::{CreateFolder, Folder};
