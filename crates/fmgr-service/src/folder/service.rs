//! Folder CRUD operations with ownership scoping.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use fmgr_core::config::FolderPolicyConfig;
use fmgr_core::error::AppError;
use fmgr_core::result::AppResult;
use fmgr_core::types::FolderId;
use fmgr_database::store::{FileStore, FolderStore};
use fmgr_entity::folder::{CreateFolder, Folder, FolderDetail};

use crate::context::RequestContext;

/// Manages folder CRUD operations.
#[derive(Debug, Clone)]
pub struct FolderService {
    /// Folder store.
    folders: Arc<dyn FolderStore>,
    /// File store, for the single-folder view.
    files: Arc<dyn FileStore>,
    /// Tree policy switches.
    policy: FolderPolicyConfig,
}

/// Request to create a new folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFolderRequest {
    /// Folder name.
    pub name: Option<String>,
    /// Parent folder ID (None for root-level). Not checked for existence.
    pub parent_id: Option<FolderId>,
}

/// Extra rows fetched beyond `take` when a listing window is requested.
const LOAD_MORE_MARGIN: i64 = 10;

impl FolderService {
    /// Creates a new folder service.
    pub fn new(
        folders: Arc<dyn FolderStore>,
        files: Arc<dyn FileStore>,
        policy: FolderPolicyConfig,
    ) -> Self {
        Self {
            folders,
            files,
            policy,
        }
    }

    /// Whether the acting user may see `folder`.
    fn is_visible(&self, ctx: &RequestContext, folder: &Folder) -> bool {
        !self.policy.enforce_ownership || folder.is_owned_by(ctx.user_id())
    }

    /// Load a folder the acting user may act on, or `NotFound`.
    async fn require_folder(&self, ctx: &RequestContext, id: &FolderId) -> AppResult<Folder> {
        self.folders
            .find_by_id(id)
            .await?
            .filter(|folder| self.is_visible(ctx, folder))
            .ok_or_else(|| AppError::not_found("Folder not found"))
    }

    /// Creates a new folder with its creator entry.
    pub async fn create(&self, ctx: &RequestContext, req: CreateFolderRequest) -> AppResult<Folder> {
        let data = CreateFolder {
            name: req.name,
            parent_id: req.parent_id,
            created_by: ctx.user_id().clone(),
        };

        let folder = self.folders.insert(&data, &ctx.actor()).await?;

        info!(
            user_id = %ctx.user_id(),
            folder_id = %folder.id,
            parent_id = ?folder.parent_id,
            "Folder created"
        );

        Ok(folder)
    }

    /// Renames a folder and appends to its history.
    pub async fn rename(&self, ctx: &RequestContext, id: &FolderId, name: &str) -> AppResult<Folder> {
        self.require_folder(ctx, id).await?;

        let folder = self
            .folders
            .rename(id, name, &ctx.actor())
            .await?
            .ok_or_else(|| AppError::not_found("Folder not found"))?;

        info!(user_id = %ctx.user_id(), folder_id = %id, name = %name, "Folder renamed");

        Ok(folder)
    }

    /// Deletes a folder. Its files and history go with it; child folders are
    /// left in place unless recursive delete is enabled.
    pub async fn delete(&self, ctx: &RequestContext, id: &FolderId) -> AppResult<Folder> {
        let folder = self.require_folder(ctx, id).await?;

        let mut removed_descendants = 0usize;
        if self.policy.recursive_delete {
            for descendant in self.deletable_descendants(ctx, id).await?.iter().rev() {
                if self.folders.delete(&descendant.id).await? {
                    removed_descendants += 1;
                }
            }
        }

        if !self.folders.delete(id).await? {
            return Err(AppError::not_found("Folder not found"));
        }

        info!(
            user_id = %ctx.user_id(),
            folder_id = %id,
            descendants = removed_descendants,
            "Folder deleted"
        );

        Ok(folder)
    }

    /// Descendants of `id` that go with it on a recursive delete, shallowest
    /// first. A folder the acting user may not see is kept, and so is
    /// everything beneath it; it is left orphaned instead.
    async fn deletable_descendants(
        &self,
        ctx: &RequestContext,
        id: &FolderId,
    ) -> AppResult<Vec<Folder>> {
        let mut reachable = HashSet::from([id.clone()]);
        let mut doomed = Vec::new();
        for folder in self.folders.find_descendants(id).await? {
            let under_doomed = folder
                .parent_id
                .as_ref()
                .is_some_and(|parent| reachable.contains(parent));
            if under_doomed && self.is_visible(ctx, &folder) {
                reachable.insert(folder.id.clone());
                doomed.push(folder);
            }
        }
        Ok(doomed)
    }

    /// Lists the acting user's folders, newest first.
    ///
    /// A positive `take` caps the listing at `take + 10` rows so the client
    /// can tell whether more remain.
    pub async fn list(&self, ctx: &RequestContext, take: Option<i64>) -> AppResult<Vec<Folder>> {
        let limit = take
            .filter(|take| *take > 0)
            .map(|take| take.saturating_add(LOAD_MORE_MARGIN));
        self.folders.find_by_owner(ctx.user_id(), limit).await
    }

    /// One folder with its files, its parent and its direct children.
    ///
    /// Returns `None` for an unknown folder, or one the acting user may not
    /// see. A parent that no longer resolves is reported as `None`.
    pub async fn get_single(
        &self,
        ctx: &RequestContext,
        id: &FolderId,
    ) -> AppResult<Option<FolderDetail>> {
        let Some(folder) = self
            .folders
            .find_by_id(id)
            .await?
            .filter(|folder| self.is_visible(ctx, folder))
        else {
            return Ok(None);
        };

        let files = self.files.find_by_folder(id).await?;

        let parent = match &folder.parent_id {
            Some(parent_id) => self
                .folders
                .find_by_id(parent_id)
                .await?
                .filter(|parent| self.is_visible(ctx, parent)),
            None => None,
        };

        let children = self
            .folders
            .find_children(id)
            .await?
            .into_iter()
            .filter(|child| self.is_visible(ctx, child))
            .collect();

        Ok(Some(FolderDetail {
            folder,
            files,
            parent,
            children,
        }))
    }
}
