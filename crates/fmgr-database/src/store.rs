//! Store traits implemented by every persistence backend.
//!
//! Services depend on these traits only, so the PostgreSQL repositories and
//! the in-memory store are interchangeable. All list queries return rows
//! newest first (`created_at` descending). Folder reads always come back with
//! their modification history attached, oldest entry first.

use std::fmt;

use async_trait::async_trait;

use fmgr_core::result::AppResult;
use fmgr_core::types::{FileId, FolderId, UserId};
use fmgr_entity::file::{CreateFile, File};
use fmgr_entity::folder::{CreateFolder, Folder};
use fmgr_entity::modification::{ModificationEntry, NewModification};
use fmgr_entity::user::User;

/// Persistence for identity-provider users.
#[async_trait]
pub trait UserStore: Send + Sync + fmt::Debug + 'static {
    /// Find a user by ID.
    async fn find_by_id(&self, id: &UserId) -> AppResult<Option<User>>;

    /// List every user.
    async fn find_all(&self) -> AppResult<Vec<User>>;

    /// Record the user unless a row with the same id exists, returning the
    /// stored row. A different id with the same email is a conflict.
    async fn insert_if_absent(&self, user: &User) -> AppResult<User>;
}

/// Persistence for folders.
#[async_trait]
pub trait FolderStore: Send + Sync + fmt::Debug + 'static {
    /// Create a folder together with its first history entry, atomically.
    async fn insert(&self, data: &CreateFolder, initial: &NewModification) -> AppResult<Folder>;

    /// Find a folder by ID.
    async fn find_by_id(&self, id: &FolderId) -> AppResult<Option<Folder>>;

    /// Folders created by `owner`, optionally capped at `limit` rows.
    async fn find_by_owner(&self, owner: &UserId, limit: Option<i64>) -> AppResult<Vec<Folder>>;

    /// Direct children of `parent`.
    async fn find_children(&self, parent: &FolderId) -> AppResult<Vec<Folder>>;

    /// Every folder below `id`, shallowest first. Cycles are visited once.
    async fn find_descendants(&self, id: &FolderId) -> AppResult<Vec<Folder>>;

    /// Rename a folder and append `entry`, atomically.
    ///
    /// Returns `None` when the folder does not exist.
    async fn rename(
        &self,
        id: &FolderId,
        name: &str,
        entry: &NewModification,
    ) -> AppResult<Option<Folder>>;

    /// Delete a folder, its files, and its history. Child folders are
    /// untouched. Returns whether a row was removed.
    async fn delete(&self, id: &FolderId) -> AppResult<bool>;
}

/// Persistence for file records.
#[async_trait]
pub trait FileStore: Send + Sync + fmt::Debug + 'static {
    /// Create a file record. Fails with `NotFound` if the folder is gone.
    async fn insert(&self, data: &CreateFile) -> AppResult<File>;

    /// Find a file by ID.
    async fn find_by_id(&self, id: &FileId) -> AppResult<Option<File>>;

    /// Files created by `owner`.
    async fn find_by_owner(&self, owner: &UserId) -> AppResult<Vec<File>>;

    /// Files inside `folder`.
    async fn find_by_folder(&self, folder: &FolderId) -> AppResult<Vec<File>>;

    /// Files whose id is in `ids`. Unknown ids are skipped.
    async fn find_by_ids(&self, ids: &[FileId]) -> AppResult<Vec<File>>;

    /// Rename a file. Returns `None` when the file does not exist.
    async fn rename(&self, id: &FileId, name: &str) -> AppResult<Option<File>>;

    /// Delete one file. Returns whether a row was removed.
    async fn delete(&self, id: &FileId) -> AppResult<bool>;

    /// Delete every file in `ids`, returning how many rows were removed.
    async fn delete_many(&self, ids: &[FileId]) -> AppResult<u64>;
}

/// Persistence for folder modification histories.
#[async_trait]
pub trait ModificationStore: Send + Sync + fmt::Debug + 'static {
    /// Append an entry stamped with the current time and bump the folder's
    /// `updated_at`. Fails with `NotFound` if the folder is gone.
    async fn append(
        &self,
        folder_id: &FolderId,
        entry: &NewModification,
    ) -> AppResult<ModificationEntry>;

    /// The history of a folder, oldest first.
    async fn find_by_folder(&self, folder_id: &FolderId) -> AppResult<Vec<ModificationEntry>>;
}
