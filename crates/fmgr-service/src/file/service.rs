//! File record operations with modification logging.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use fmgr_core::config::FolderPolicyConfig;
use fmgr_core::error::AppError;
use fmgr_core::result::AppResult;
use fmgr_core::types::{FileId, FolderId};
use fmgr_database::store::{FileStore, FolderStore};
use fmgr_entity::file::{CreateFile, File, FileSummary};
use fmgr_entity::folder::Folder;

use crate::context::RequestContext;
use crate::modification::ModificationLog;

/// Manages file records. Every mutation appends to the owning folder's log
/// once the primary write has succeeded.
#[derive(Debug, Clone)]
pub struct FileService {
    /// File store.
    files: Arc<dyn FileStore>,
    /// Folder store, for existence and ownership checks.
    folders: Arc<dyn FolderStore>,
    /// Modification log.
    log: ModificationLog,
    /// Tree policy switches.
    policy: FolderPolicyConfig,
}

/// Request to record an uploaded file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFileRequest {
    /// File name.
    pub name: String,
    /// Location of the uploaded bytes.
    pub url: String,
    /// MIME type.
    pub mime_type: String,
    /// Destination folder.
    pub folder_id: FolderId,
}

impl FileService {
    /// Creates a new file service.
    pub fn new(
        files: Arc<dyn FileStore>,
        folders: Arc<dyn FolderStore>,
        log: ModificationLog,
        policy: FolderPolicyConfig,
    ) -> Self {
        Self {
            files,
            folders,
            log,
            policy,
        }
    }

    fn owns_file(&self, ctx: &RequestContext, file: &File) -> bool {
        !self.policy.enforce_ownership || file.is_owned_by(ctx.user_id())
    }

    fn owns_folder(&self, ctx: &RequestContext, folder: &Folder) -> bool {
        !self.policy.enforce_ownership || folder.is_owned_by(ctx.user_id())
    }

    async fn require_folder(&self, ctx: &RequestContext, id: &FolderId) -> AppResult<Folder> {
        self.folders
            .find_by_id(id)
            .await?
            .filter(|folder| self.owns_folder(ctx, folder))
            .ok_or_else(|| AppError::not_found("Folder not found"))
    }

    /// Load a file the acting user may act on, together with its folder id.
    async fn require_file(&self, ctx: &RequestContext, id: &FileId) -> AppResult<(File, FolderId)> {
        let file = self
            .files
            .find_by_id(id)
            .await?
            .filter(|file| self.owns_file(ctx, file))
            .ok_or_else(|| AppError::not_found("File not found"))?;
        let folder_id = file
            .folder_id
            .clone()
            .ok_or_else(|| AppError::not_found("File not found"))?;
        Ok((file, folder_id))
    }

    /// Records a new file in an existing folder.
    pub async fn create(&self, ctx: &RequestContext, req: CreateFileRequest) -> AppResult<File> {
        self.require_folder(ctx, &req.folder_id).await?;

        let data = CreateFile {
            name: req.name,
            url: req.url,
            mime_type: req.mime_type,
            folder_id: req.folder_id,
            created_by: ctx.user_id().clone(),
        };
        let file = self.files.insert(&data).await?;

        self.log.append(ctx, &data.folder_id).await?;

        info!(
            user_id = %ctx.user_id(),
            file_id = %file.id,
            folder_id = %data.folder_id,
            "File created"
        );

        Ok(file)
    }

    /// Renames a file.
    pub async fn rename(&self, ctx: &RequestContext, id: &FileId, name: &str) -> AppResult<File> {
        let (_, folder_id) = self.require_file(ctx, id).await?;

        let file = self
            .files
            .rename(id, name)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))?;

        self.log.append(ctx, &folder_id).await?;

        info!(user_id = %ctx.user_id(), file_id = %id, name = %name, "File renamed");

        Ok(file)
    }

    /// Deletes one file.
    pub async fn delete_one(&self, ctx: &RequestContext, id: &FileId) -> AppResult<File> {
        let (file, folder_id) = self.require_file(ctx, id).await?;

        if !self.files.delete(id).await? {
            return Err(AppError::not_found("File not found"));
        }

        self.log.append(ctx, &folder_id).await?;

        info!(user_id = %ctx.user_id(), file_id = %id, folder_id = %folder_id, "File deleted");

        Ok(file)
    }

    /// Deletes every listed file that resolves, skipping unknown ids, and
    /// appends one entry per distinct owning folder. Returns the number of
    /// files removed.
    pub async fn delete_many(&self, ctx: &RequestContext, ids: &[FileId]) -> AppResult<u64> {
        let found = self.files.find_by_ids(ids).await?;

        // Keep the caller's order so folder entries follow first mention.
        let mut targets: Vec<&File> = Vec::with_capacity(found.len());
        for id in ids {
            if let Some(file) = found.iter().find(|f| &f.id == id) {
                if self.owns_file(ctx, file) && !targets.iter().any(|t| t.id == file.id) {
                    targets.push(file);
                }
            }
        }

        let target_ids: Vec<FileId> = targets.iter().map(|f| f.id.clone()).collect();
        let deleted = self.files.delete_many(&target_ids).await?;

        let mut folder_ids: Vec<FolderId> = Vec::new();
        for folder_id in targets.iter().filter_map(|f| f.folder_id.as_ref()) {
            if !folder_ids.contains(folder_id) {
                folder_ids.push(folder_id.clone());
            }
        }

        let mut touched = 0usize;
        for folder_id in &folder_ids {
            match self.log.append(ctx, folder_id).await {
                Ok(_) => touched += 1,
                Err(e) if e.is_not_found() => {
                    warn!(folder_id = %folder_id, "Folder vanished before its entry was recorded");
                }
                Err(e) => return Err(e),
            }
        }

        info!(
            user_id = %ctx.user_id(),
            requested = ids.len(),
            deleted = deleted,
            folders = touched,
            "Files deleted"
        );

        Ok(deleted)
    }

    /// Every file the acting user created, newest first.
    pub async fn get_all(&self, ctx: &RequestContext) -> AppResult<Vec<File>> {
        self.files.find_by_owner(ctx.user_id()).await
    }

    /// Files in one folder, newest first. An unknown folder, or one the acting
    /// user does not own, yields an empty list.
    pub async fn get_all_of_folder(
        &self,
        ctx: &RequestContext,
        folder_id: &FolderId,
    ) -> AppResult<Vec<File>> {
        if self.policy.enforce_ownership {
            let owned = self
                .folders
                .find_by_id(folder_id)
                .await?
                .is_some_and(|folder| folder.is_owned_by(ctx.user_id()));
            if !owned {
                return Ok(Vec::new());
            }
        }
        self.files.find_by_folder(folder_id).await
    }

    /// The download projection of the listed files, newest first.
    pub async fn get_by_ids(
        &self,
        ctx: &RequestContext,
        ids: &[FileId],
    ) -> AppResult<Vec<FileSummary>> {
        let files = self.files.find_by_ids(ids).await?;
        Ok(files
            .into_iter()
            .filter(|file| self.owns_file(ctx, file))
            .map(FileSummary::from)
            .collect())
    }

    /// One file.
    pub async fn get_single(&self, ctx: &RequestContext, id: &FileId) -> AppResult<File> {
        self.files
            .find_by_id(id)
            .await?
            .filter(|file| self.owns_file(ctx, file))
            .ok_or_else(|| AppError::not_found("File not found"))
    }
}
