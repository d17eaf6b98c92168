//! Modification log entry model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use fmgr_core::types::UserId;

use crate::user::Identity;

/// One immutable record in a folder's activity trail.
///
/// Entries are only ever appended; `seq` orders them within a folder.
/// On the wire an entry is `{lastModifiedBy, name, lastModifiedAt}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ModificationEntry {
    /// Append order (row id of `folder_modifications`).
    #[serde(skip)]
    #[sqlx(rename = "id")]
    pub seq: i64,
    /// The acting user.
    #[serde(rename = "lastModifiedBy")]
    pub actor_id: UserId,
    /// The actor's display name at the time of the action.
    #[serde(rename = "name")]
    pub actor_name: Option<String>,
    /// When the action happened (RFC 3339 on the wire).
    #[serde(rename = "lastModifiedAt")]
    pub occurred_at: DateTime<Utc>,
}

/// Data required to append an entry; the store stamps the time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewModification {
    /// The acting user.
    pub actor_id: UserId,
    /// Display-name snapshot.
    pub actor_name: Option<String>,
}

impl NewModification {
    /// Attribute an entry to the given identity.
    pub fn by(identity: &Identity) -> Self {
        Self {
            actor_id: identity.id.clone(),
            actor_name: identity.name.clone(),
        }
    }

    /// Materialize the entry with its append sequence and timestamp.
    pub fn into_entry(self, seq: i64, occurred_at: DateTime<Utc>) -> ModificationEntry {
        ModificationEntry {
            seq,
            actor_id: self.actor_id,
            actor_name: self.actor_name,
            occurred_at,
        }
    }
}
