//! Appends and reads folder modification entries.

use std::sync::Arc;

use tracing::debug;

use fmgr_core::result::AppResult;
use fmgr_core::types::FolderId;
use fmgr_database::store::ModificationStore;
use fmgr_entity::modification::ModificationEntry;

use crate::context::RequestContext;

/// Records who touched a folder's contents and when.
#[derive(Debug, Clone)]
pub struct ModificationLog {
    store: Arc<dyn ModificationStore>,
}

impl ModificationLog {
    /// Creates a new modification log.
    pub fn new(store: Arc<dyn ModificationStore>) -> Self {
        Self { store }
    }

    /// Append one entry attributed to the acting user.
    pub async fn append(
        &self,
        ctx: &RequestContext,
        folder_id: &FolderId,
    ) -> AppResult<ModificationEntry> {
        let entry = self.store.append(folder_id, &ctx.actor()).await?;
        debug!(folder_id = %folder_id, user_id = %ctx.user_id(), "Modification recorded");
        Ok(entry)
    }

    /// A folder's full history, oldest first.
    pub async fn history(&self, folder_id: &FolderId) -> AppResult<Vec<ModificationEntry>> {
        self.store.find_by_folder(folder_id).await
    }
}
