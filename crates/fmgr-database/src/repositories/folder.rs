//! Folder repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use fmgr_core::error::{AppError, ErrorKind};
use fmgr_core::result::AppResult;
use fmgr_core::types::{FolderId, UserId};
use fmgr_entity::folder::{CreateFolder, Folder};
use fmgr_entity::modification::NewModification;

use super::modification::{attach_histories, insert_entry};
use crate::store::FolderStore;

/// Depth cap for the descendant walk, so a parent cycle cannot recurse forever.
const MAX_TREE_DEPTH: i32 = 256;

/// Repository for folder CRUD and tree queries.
#[derive(Debug, Clone)]
pub struct FolderRepository {
    pool: PgPool,
}

impl FolderRepository {
    /// Create a new folder repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn with_histories(&self, mut folders: Vec<Folder>) -> AppResult<Vec<Folder>> {
        attach_histories(&self.pool, &mut folders).await?;
        Ok(folders)
    }

    async fn with_history(&self, folder: Option<Folder>) -> AppResult<Option<Folder>> {
        match folder {
            Some(folder) => Ok(self.with_histories(vec![folder]).await?.pop()),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl FolderStore for FolderRepository {
    async fn insert(&self, data: &CreateFolder, initial: &NewModification) -> AppResult<Folder> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let mut folder = sqlx::query_as::<_, Folder>(
            "INSERT INTO folders (id, name, parent_id, created_by) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(FolderId::generate())
        .bind(&data.name)
        .bind(&data.parent_id)
        .bind(&data.created_by)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create folder", e))?;

        let entry = insert_entry(&mut tx, &folder.id, initial).await?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit folder", e)
        })?;

        folder.modification = vec![entry];
        Ok(folder)
    }

    async fn find_by_id(&self, id: &FolderId) -> AppResult<Option<Folder>> {
        let folder = sqlx::query_as::<_, Folder>("SELECT * FROM folders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find folder", e))?;
        self.with_history(folder).await
    }

    async fn find_by_owner(&self, owner: &UserId, limit: Option<i64>) -> AppResult<Vec<Folder>> {
        // LIMIT NULL is LIMIT ALL in PostgreSQL.
        let folders = sqlx::query_as::<_, Folder>(
            "SELECT * FROM folders WHERE created_by = $1 \
             ORDER BY created_at DESC, id DESC LIMIT $2",
        )
        .bind(owner)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list folders", e))?;
        self.with_histories(folders).await
    }

    async fn find_children(&self, parent: &FolderId) -> AppResult<Vec<Folder>> {
        let folders = sqlx::query_as::<_, Folder>(
            "SELECT * FROM folders WHERE parent_id = $1 ORDER BY created_at DESC, id DESC",
        )
        .bind(parent)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list children", e))?;
        self.with_histories(folders).await
    }

    async fn find_descendants(&self, id: &FolderId) -> AppResult<Vec<Folder>> {
        let folders = sqlx::query_as::<_, Folder>(
            "WITH RECURSIVE tree AS ( \
                SELECT id, 0 AS depth FROM folders WHERE id = $1 \
                UNION ALL \
                SELECT f.id, t.depth + 1 FROM folders f \
                INNER JOIN tree t ON f.parent_id = t.id \
                WHERE t.depth < $2 \
             ), first_seen AS ( \
                SELECT id, MIN(depth) AS depth FROM tree WHERE id <> $1 GROUP BY id \
             ) \
             SELECT f.* FROM folders f INNER JOIN first_seen s ON s.id = f.id \
             ORDER BY s.depth ASC, f.created_at DESC",
        )
        .bind(id)
        .bind(MAX_TREE_DEPTH)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list descendants", e))?;
        self.with_histories(folders).await
    }

    async fn rename(
        &self,
        id: &FolderId,
        name: &str,
        entry: &NewModification,
    ) -> AppResult<Option<Folder>> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let renamed = sqlx::query_as::<_, Folder>(
            "UPDATE folders SET name = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(name)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to rename folder", e))?;

        if renamed.is_none() {
            return Ok(None);
        }

        insert_entry(&mut tx, id, entry).await?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit rename", e)
        })?;

        self.with_history(renamed).await
    }

    async fn delete(&self, id: &FolderId) -> AppResult<bool> {
        // files and folder_modifications cascade on the foreign key.
        let result = sqlx::query("DELETE FROM folders WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete folder", e))?;
        Ok(result.rows_affected() > 0)
    }
}
