//! Folder modification history repository.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{FromRow, PgConnection, PgPool};

use fmgr_core::error::{AppError, ErrorKind};
use fmgr_core::result::AppResult;
use fmgr_core::types::{FolderId, to_strings};
use fmgr_entity::folder::Folder;
use fmgr_entity::modification::{ModificationEntry, NewModification};

use crate::store::ModificationStore;

const ENTRY_COLUMNS: &str = "id, actor_id, actor_name, occurred_at";

/// Repository for the append-only `folder_modifications` table.
#[derive(Debug, Clone)]
pub struct ModificationRepository {
    pool: PgPool,
}

impl ModificationRepository {
    /// Create a new modification repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ModificationStore for ModificationRepository {
    async fn append(
        &self,
        folder_id: &FolderId,
        entry: &NewModification,
    ) -> AppResult<ModificationEntry> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let appended = insert_entry(&mut tx, folder_id, entry).await?;

        sqlx::query("UPDATE folders SET updated_at = $2 WHERE id = $1")
            .bind(folder_id)
            .bind(appended.occurred_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to touch folder", e)
            })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit modification", e)
        })?;

        Ok(appended)
    }

    async fn find_by_folder(&self, folder_id: &FolderId) -> AppResult<Vec<ModificationEntry>> {
        sqlx::query_as::<_, ModificationEntry>(&format!(
            "SELECT {ENTRY_COLUMNS} FROM folder_modifications WHERE folder_id = $1 ORDER BY id ASC"
        ))
        .bind(folder_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load history", e))
    }
}

/// Insert one history row on an open connection or transaction.
///
/// A foreign-key violation means the folder vanished and maps to `NotFound`.
pub(crate) async fn insert_entry(
    conn: &mut PgConnection,
    folder_id: &FolderId,
    entry: &NewModification,
) -> AppResult<ModificationEntry> {
    sqlx::query_as::<_, ModificationEntry>(&format!(
        "INSERT INTO folder_modifications (folder_id, actor_id, actor_name) \
         VALUES ($1, $2, $3) RETURNING {ENTRY_COLUMNS}"
    ))
    .bind(folder_id)
    .bind(&entry.actor_id)
    .bind(&entry.actor_name)
    .fetch_one(conn)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
            AppError::not_found("Folder not found")
        }
        _ => AppError::with_source(ErrorKind::Database, "Failed to append modification", e),
    })
}

#[derive(FromRow)]
struct FolderEntryRow {
    folder_id: FolderId,
    #[sqlx(flatten)]
    entry: ModificationEntry,
}

/// Attach each folder's history in a single query.
pub(crate) async fn attach_histories(pool: &PgPool, folders: &mut [Folder]) -> AppResult<()> {
    if folders.is_empty() {
        return Ok(());
    }

    let ids: Vec<&FolderId> = folders.iter().map(|f| &f.id).collect();
    let rows = sqlx::query_as::<_, FolderEntryRow>(&format!(
        "SELECT folder_id, {ENTRY_COLUMNS} FROM folder_modifications \
         WHERE folder_id = ANY($1) ORDER BY id ASC"
    ))
    .bind(to_strings(&ids))
    .fetch_all(pool)
    .await
    .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load histories", e))?;

    let mut grouped: HashMap<FolderId, Vec<ModificationEntry>> = HashMap::new();
    for row in rows {
        grouped.entry(row.folder_id).or_default().push(row.entry);
    }

    for folder in folders.iter_mut() {
        folder.modification = grouped.remove(&folder.id).unwrap_or_default();
    }
    Ok(())
}
