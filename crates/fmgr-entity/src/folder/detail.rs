//! One-level expansion of a folder for the detail view.

use serde::{Deserialize, Serialize};

use crate::file::File;

use super::model::Folder;

/// A folder together with its direct files, its parent, and its direct
/// child folders.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderDetail {
    /// The folder itself, including its modification log.
    #[serde(flatten)]
    pub folder: Folder,
    /// Files whose `folder_id` is this folder, newest first.
    pub files: Vec<File>,
    /// The parent folder, or `None` for root-level and detached folders.
    pub parent: Option<Folder>,
    /// Folders whose `parent_id` is this folder, newest first.
    pub children: Vec<Folder>,
}

impl FolderDetail {
    /// A folder whose `parent_id` is set but did not resolve.
    pub fn is_detached(&self) -> bool {
        self.folder.parent_id.is_some() && self.parent.is_none()
    }
}
