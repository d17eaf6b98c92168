//! File entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use fmgr_core::types::{FileId, FolderId, UserId};

/// A leaf record pointing to bytes held by the external upload service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct File {
    /// Unique file identifier.
    pub id: FileId,
    /// The file name (including extension).
    pub name: Option<String>,
    /// Location of the uploaded bytes.
    pub url: Option<String>,
    /// MIME type reported by the upload service.
    #[serde(rename = "type")]
    pub mime_type: Option<String>,
    /// When the file was created.
    pub created_at: DateTime<Utc>,
    /// When the file was last renamed.
    pub updated_at: DateTime<Utc>,
    /// The uploading user.
    pub created_by: Option<UserId>,
    /// The containing folder. Rows are removed with their folder.
    pub folder_id: Option<FolderId>,
}

impl File {
    /// Whether `user_id` created this file.
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        self.created_by.as_ref() == Some(user_id)
    }
}

/// Data required to create a new file record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFile {
    /// The file name.
    pub name: String,
    /// Location of the uploaded bytes.
    pub url: String,
    /// MIME type.
    pub mime_type: String,
    /// The folder to place the file in; must exist.
    pub folder_id: FolderId,
    /// The uploading user.
    pub created_by: UserId,
}

/// The subset of a file needed to assemble a bulk download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSummary {
    /// File identifier.
    pub id: FileId,
    /// File name.
    pub name: Option<String>,
    /// Location of the bytes.
    pub url: Option<String>,
    /// MIME type.
    #[serde(rename = "type")]
    pub mime_type: Option<String>,
}

impl From<File> for FileSummary {
    fn from(file: File) -> Self {
        Self {
            id: file.id,
            name: file.name,
            url: file.url,
            mime_type: file.mime_type,
        }
    }
}
