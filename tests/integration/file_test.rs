//! Integration tests for file operations.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::TestApp;

#[tokio::test]
async fn test_create_file_logs_to_folder() {
    let app = TestApp::new();
    let folder = app.create_folder("alice", "Photos", None).await;

    let response = app
        .post(
            "/api/fmgr/createFile",
            json!({
                "name": "cat.png",
                "url": "https://utfs.io/f/cat.png",
                "type": "image/png",
                "folderId": folder,
            }),
            "alice",
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["message"], "File added successfully");

    let files = app
        .get(&format!("/api/fmgr/getAllFilesOfFolder?folderId={folder}"), "alice")
        .await;
    let data = &files.items()[0];
    assert_eq!(data["name"], "cat.png");
    assert_eq!(data["type"], "image/png");
    assert_eq!(data["folderId"], folder.as_str());
    assert_eq!(data["createdBy"], "alice");
    assert_eq!(app.history_len("alice", &folder).await, 2);
}

#[tokio::test]
async fn test_create_file_in_missing_folder_is_not_found() {
    let app = TestApp::new();

    let response = app
        .post(
            "/api/fmgr/createFile",
            json!({
                "name": "cat.png",
                "url": "https://utfs.io/f/cat.png",
                "type": "image/png",
                "folderId": "missing",
            }),
            "alice",
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["message"], "Folder not found");
    let files = app.get("/api/fmgr/getAllFiles", "alice").await;
    assert!(files.items().is_empty());
}

#[tokio::test]
async fn test_create_file_rejects_bad_url_and_type() {
    let app = TestApp::new();
    let folder = app.create_folder("alice", "Photos", None).await;

    let bad_url = app
        .post(
            "/api/fmgr/createFile",
            json!({ "name": "a", "url": "not a url", "type": "image/png", "folderId": folder }),
            "alice",
        )
        .await;
    assert_eq!(bad_url.status, StatusCode::BAD_REQUEST);

    let bad_type = app
        .post(
            "/api/fmgr/createFile",
            json!({ "name": "a", "url": "https://utfs.io/f/a", "type": "png", "folderId": folder }),
            "alice",
        )
        .await;
    assert_eq!(bad_type.status, StatusCode::BAD_REQUEST);
    assert_eq!(app.history_len("alice", &folder).await, 1);
}

#[tokio::test]
async fn test_rename_file_logs_to_owning_folder() {
    let app = TestApp::new();
    let folder = app.create_folder("alice", "Docs", None).await;
    let file = app.create_file("alice", &folder, "draft.png").await;

    let response = app
        .post(
            "/api/fmgr/updateFileName",
            json!({ "id": file, "name": "final.png" }),
            "alice",
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["message"], "File updated successfully");

    let stored = app
        .get(&format!("/api/fmgr/getSingleFile?id={file}"), "alice")
        .await;
    assert_eq!(stored.body["data"]["name"], "final.png");
    assert_eq!(app.history_len("alice", &folder).await, 3);
}

#[tokio::test]
async fn test_delete_one_file_logs_to_owning_folder() {
    let app = TestApp::new();
    let folder = app.create_folder("alice", "Docs", None).await;
    let file = app.create_file("alice", &folder, "old.png").await;

    let response = app
        .post("/api/fmgr/deleteOneFile", json!({ "id": file }), "alice")
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["message"], "File deleted successfully");

    assert_eq!(app.history_len("alice", &folder).await, 3);
    let response = app
        .get(&format!("/api/fmgr/getSingleFile?id={file}"), "alice")
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["message"], "File not found");
}

#[tokio::test]
async fn test_delete_multiple_logs_once_per_folder() {
    let app = TestApp::new();
    let a = app.create_folder("alice", "a", None).await;
    let b = app.create_folder("alice", "b", None).await;
    let a1 = app.create_file("alice", &a, "a1.png").await;
    let a2 = app.create_file("alice", &a, "a2.png").await;
    let b1 = app.create_file("alice", &b, "b1.png").await;

    let response = app
        .post(
            "/api/fmgr/deleteMultipleFiles",
            json!({ "ids": [a1, "missing", a2, b1] }),
            "alice",
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["deleted"], 3);
    // create + two files + one bulk delete
    assert_eq!(app.history_len("alice", &a).await, 4);
    assert_eq!(app.history_len("alice", &b).await, 3);
    assert!(app.get("/api/fmgr/getAllFiles", "alice").await.items().is_empty());
}

#[tokio::test]
async fn test_delete_multiple_with_only_unknown_ids() {
    let app = TestApp::new();

    let response = app
        .post(
            "/api/fmgr/deleteMultipleFiles",
            json!({ "ids": ["nope", "nada"] }),
            "alice",
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["deleted"], 0);
}

#[tokio::test]
async fn test_files_by_ids_returns_download_projection() {
    let app = TestApp::new();
    let folder = app.create_folder("alice", "Docs", None).await;
    let first = app.create_file("alice", &folder, "one.png").await;
    let second = app.create_file("alice", &folder, "two.png").await;

    let response = app
        .post(
            "/api/fmgr/getMultipleFilesByIds",
            json!({ "fileIds": [first, second, "missing"] }),
            "alice",
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let items = response.items();
    assert_eq!(items.len(), 2);
    let mut keys: Vec<&str> = items[0]
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    keys.sort_unstable();
    assert_eq!(keys, vec!["id", "name", "type", "url"]);
}

#[tokio::test]
async fn test_files_of_folder_newest_first() {
    let app = TestApp::new();
    let folder = app.create_folder("alice", "Docs", None).await;
    let other = app.create_folder("alice", "Other", None).await;
    let older = app.create_file("alice", &folder, "older.png").await;
    let newer = app.create_file("alice", &folder, "newer.png").await;
    app.create_file("alice", &other, "elsewhere.png").await;

    let response = app
        .get(&format!("/api/fmgr/getAllFilesOfFolder?folderId={folder}"), "alice")
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let ids: Vec<&str> = response
        .items()
        .iter()
        .map(|f| f["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec![newer.as_str(), older.as_str()]);
}

#[tokio::test]
async fn test_other_users_files_stay_hidden() {
    let app = TestApp::new();
    let folder = app.create_folder("bob", "Private", None).await;
    let file = app.create_file("bob", &folder, "secret.png").await;

    let all = app.get("/api/fmgr/getAllFiles", "alice").await;
    assert!(all.items().is_empty());

    let single = app
        .get(&format!("/api/fmgr/getSingleFile?id={file}"), "alice")
        .await;
    assert_eq!(single.status, StatusCode::NOT_FOUND);

    let of_folder = app
        .get(&format!("/api/fmgr/getAllFilesOfFolder?folderId={folder}"), "alice")
        .await;
    assert!(of_folder.items().is_empty());

    let bulk = app
        .post(
            "/api/fmgr/deleteMultipleFiles",
            json!({ "ids": [file] }),
            "alice",
        )
        .await;
    assert_eq!(bulk.body["data"]["deleted"], 0);

    let upload = app
        .post(
            "/api/fmgr/createFile",
            json!({
                "name": "intruder.png",
                "url": "https://utfs.io/f/intruder.png",
                "type": "image/png",
                "folderId": folder,
            }),
            "alice",
        )
        .await;
    assert_eq!(upload.status, StatusCode::NOT_FOUND);
    assert_eq!(app.history_len("bob", &folder).await, 2);
}
