//! File handlers.

use axum::Json;
use axum::extract::State;

use fmgr_entity::file::{File, FileSummary};
use fmgr_service::CreateFileRequest as SvcCreateFile;

use crate::dto::request::{
    CreateFileRequest, DeleteFileRequest, DeleteFilesRequest, FileIdQuery, FilesByIdsRequest,
    FolderFilesQuery, UpdateFileNameRequest,
};
use crate::dto::response::{ApiResponse, DeleteFilesResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson, ValidatedQuery};
use crate::state::AppState;

/// POST /api/fmgr/createFile
pub async fn create_file(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateFileRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .file_service
        .create(
            &auth,
            SvcCreateFile {
                name: req.name,
                url: req.url,
                mime_type: req.mime_type,
                folder_id: req.folder_id,
            },
        )
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "File added successfully",
    ))))
}

/// POST /api/fmgr/updateFileName
pub async fn update_file_name(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<UpdateFileNameRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.file_service.rename(&auth, &req.id, &req.name).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "File updated successfully",
    ))))
}

/// POST /api/fmgr/deleteOneFile
pub async fn delete_one_file(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<DeleteFileRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.file_service.delete_one(&auth, &req.id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "File deleted successfully",
    ))))
}

/// POST /api/fmgr/deleteMultipleFiles
pub async fn delete_multiple_files(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<DeleteFilesRequest>,
) -> Result<Json<ApiResponse<DeleteFilesResponse>>, ApiError> {
    let deleted = state.file_service.delete_many(&auth, &req.ids).await?;
    Ok(Json(ApiResponse::ok(DeleteFilesResponse {
        message: "Files deleted successfully".to_string(),
        deleted,
    })))
}

/// GET /api/fmgr/getAllFiles
pub async fn get_all_files(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<File>>>, ApiError> {
    let files = state.file_service.get_all(&auth).await?;
    Ok(Json(ApiResponse::ok(files)))
}

/// GET /api/fmgr/getAllFilesOfFolder?folderId=
pub async fn get_all_files_of_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedQuery(query): ValidatedQuery<FolderFilesQuery>,
) -> Result<Json<ApiResponse<Vec<File>>>, ApiError> {
    let files = state
        .file_service
        .get_all_of_folder(&auth, &query.folder_id)
        .await?;
    Ok(Json(ApiResponse::ok(files)))
}

/// POST /api/fmgr/getMultipleFilesByIds
pub async fn get_multiple_files_by_ids(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<FilesByIdsRequest>,
) -> Result<Json<ApiResponse<Vec<FileSummary>>>, ApiError> {
    let files = state.file_service.get_by_ids(&auth, &req.file_ids).await?;
    Ok(Json(ApiResponse::ok(files)))
}

/// GET /api/fmgr/getSingleFile?id=
pub async fn get_single_file(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedQuery(query): ValidatedQuery<FileIdQuery>,
) -> Result<Json<ApiResponse<File>>, ApiError> {
    let file = state.file_service.get_single(&auth, &query.id).await?;
    Ok(Json(ApiResponse::ok(file)))
}
