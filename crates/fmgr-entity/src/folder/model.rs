//! Folder entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use fmgr_core::types::{FolderId, UserId};

use crate::modification::ModificationEntry;

/// A node in the folder hierarchy.
///
/// `parent_id` is a soft reference: nothing guarantees it resolves, and a
/// dangling parent is treated as root-level for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    /// Unique folder identifier.
    pub id: FolderId,
    /// Folder name (legacy rows may have none).
    pub name: Option<String>,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
    /// When the folder was last renamed or had its contents changed.
    pub updated_at: DateTime<Utc>,
    /// The creating user (null only for orphaned legacy rows).
    pub created_by: Option<UserId>,
    /// Parent folder ID (null for root folders).
    pub parent_id: Option<FolderId>,
    /// Activity trail, oldest first. Loaded from `folder_modifications`.
    #[sqlx(skip)]
    #[serde(default)]
    pub modification: Vec<ModificationEntry>,
}

impl Folder {
    /// Check if this is a root folder (no parent).
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Whether `user_id` created this folder.
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        self.created_by.as_ref() == Some(user_id)
    }
}

/// Data required to create a new folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFolder {
    /// Folder name.
    pub name: Option<String>,
    /// Parent folder (None for root). Not checked for existence.
    pub parent_id: Option<FolderId>,
    /// The creating user.
    pub created_by: UserId,
}
