//! Folder handlers.

use axum::Json;
use axum::extract::State;

use fmgr_entity::folder::{Folder, FolderDetail};
use fmgr_service::CreateFolderRequest as SvcCreateFolder;

use crate::dto::request::{
    CreateFolderRequest, DeleteFolderRequest, FolderIdQuery, ListFoldersQuery,
    UpdateFolderRequest,
};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson, ValidatedQuery};
use crate::state::AppState;

/// POST /api/fmgr/createFolder
pub async fn create_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateFolderRequest>,
) -> Result<Json<ApiResponse<Folder>>, ApiError> {
    let folder = state
        .folder_service
        .create(
            &auth,
            SvcCreateFolder {
                name: req.name,
                parent_id: req.parent_id,
            },
        )
        .await?;
    Ok(Json(ApiResponse::ok(folder)))
}

/// POST /api/fmgr/updateFolder
pub async fn update_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<UpdateFolderRequest>,
) -> Result<Json<ApiResponse<Folder>>, ApiError> {
    let folder = state
        .folder_service
        .rename(&auth, &req.id, &req.name)
        .await?;
    Ok(Json(ApiResponse::ok(folder)))
}

/// POST /api/fmgr/deleteFolder
pub async fn delete_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<DeleteFolderRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.folder_service.delete(&auth, &req.id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Folder deleted successfully",
    ))))
}

/// GET /api/fmgr/getAllFolders?take=
pub async fn get_all_folders(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedQuery(query): ValidatedQuery<ListFoldersQuery>,
) -> Result<Json<ApiResponse<Vec<Folder>>>, ApiError> {
    let folders = state.folder_service.list(&auth, query.take).await?;
    Ok(Json(ApiResponse::ok(folders)))
}

/// GET /api/fmgr/getSingleFolder?id=
///
/// `data` is `null` when the folder does not resolve.
pub async fn get_single_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedQuery(query): ValidatedQuery<FolderIdQuery>,
) -> Result<Json<ApiResponse<Option<FolderDetail>>>, ApiError> {
    let detail = state.folder_service.get_single(&auth, &query.id).await?;
    Ok(Json(ApiResponse::ok(detail)))
}
