//! Folder tree policy switches.

use serde::{Deserialize, Serialize};

/// Behavior toggles for tree mutations and detail reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderPolicyConfig {
    /// Delete descendant folders (and their files) together with a folder.
    ///
    /// When `false`, child folders survive as orphans whose `parent_id`
    /// no longer resolves.
    #[serde(default)]
    pub recursive_delete: bool,
    /// Restrict by-id reads and mutations to the entity's creator.
    #[serde(default = "default_true")]
    pub enforce_ownership: bool,
}

impl Default for FolderPolicyConfig {
    fn default() -> Self {
        Self {
            recursive_delete: false,
            enforce_ownership: true,
        }
    }
}

fn default_true() -> bool {
    true
}
