//! Request DTOs with validation.
//!
//! Field names are camelCase on the wire.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use fmgr_core::types::{FileId, FolderId, UserId};


/// `createFolder` body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateFolderRequest {
    /// Folder name.
    #[validate(length(min = 1, max = 255, message = "Folder name must be 1-255 characters"))]
    pub name: Option<String>,
    /// Parent folder ID; omitted for a root-level folder.
    #[serde(default)]
    pub parent_id: Option<FolderId>,
}

/// `updateFolder` body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFolderRequest {
    /// Folder ID.
    pub id: FolderId,
    /// New name.
    #[validate(length(min = 1, max = 255, message = "Folder name must be 1-255 characters"))]
    pub name: String,
}

/// `deleteFolder` body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DeleteFolderRequest {
    /// Folder ID.
    pub id: FolderId,
}

/// `createFile` body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateFileRequest {
    /// File name.
    #[validate(length(min = 1, max = 255, message = "File name must be 1-255 characters"))]
    pub name: String,
    /// Location of the uploaded bytes.
    #[validate(
        url(message = "url must be an absolute URL"),
        custom(function = "validate_http_url")
    )]
    pub url: String,
    /// MIME type.
    #[serde(rename = "type")]
    #[validate(custom(function = "validate_mime_type"))]
    pub mime_type: String,
    /// Destination folder.
    pub folder_id: FolderId,
}

/// `updateFileName` body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateFileNameRequest {
    /// File ID.
    pub id: FileId,
    /// New name.
    #[validate(length(min = 1, max = 255, message = "File name must be 1-255 characters"))]
    pub name: String,
}

/// `deleteOneFile` body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DeleteFileRequest {
    /// File ID.
    pub id: FileId,
}

/// `deleteMultipleFiles` body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DeleteFilesRequest {
    /// File IDs; unknown ones are skipped.
    #[validate(length(max = 1000, message = "Too many ids in one request"))]
    pub ids: Vec<FileId>,
}

/// `getMultipleFilesByIds` body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FilesByIdsRequest {
    /// File IDs.
    #[validate(length(max = 1000, message = "Too many ids in one request"))]
    pub file_ids: Vec<FileId>,
}

/// `getAllFolders` query.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ListFoldersQuery {
    /// "Load more" window; positive values cap the listing at `take + 10`.
    pub take: Option<i64>,
}

/// `getSingleFolder` query.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FolderIdQuery {
    /// Folder ID.
    pub id: FolderId,
}

/// `getAllFilesOfFolder` query.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FolderFilesQuery {
    /// Folder ID.
    pub folder_id: FolderId,
}

/// `getSingleFile` query.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FileIdQuery {
    /// File ID.
    pub id: FileId,
}

/// `getUser` query.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UserIdQuery {
    /// User ID.
    pub id: UserId,
}

/// Accept only `http` and `https` URLs.
fn validate_http_url(url: &str) -> Result<(), ValidationError> {
    let lower = url.to_ascii_lowercase();
    if lower.starts_with("https://") || lower.starts_with("http://") {
        Ok(())
    } else {
        Err(ValidationError::new("http_url").with_message("url must use http or https".into()))
    }
}

/// Accept `type/subtype`, optionally followed by `;` parameters.
fn validate_mime_type(value: &str) -> Result<(), ValidationError> {
    fn is_token(part: &str) -> bool {
        !part.is_empty()
            && part
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || "!#$&^_.+-".contains(c))
    }

    let essence = value.split(';').next().unwrap_or_default().trim();
    let valid = match essence.split_once('/') {
        Some((kind, subtype)) => is_token(kind) && is_token(subtype),
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(ValidationError::new("mime_type").with_message("type must look like type/subtype".into()))
    }
}
