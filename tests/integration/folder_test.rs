//! Integration tests for folder operations.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use fmgr_core::config::AppConfig;
use helpers::TestApp;

#[tokio::test]
async fn test_create_folder_starts_history() {
    let app = TestApp::new();

    let response = app
        .post("/api/fmgr/createFolder", json!({ "name": "Photos" }), "alice")
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    let data = &response.body["data"];
    assert_eq!(data["name"], "Photos");
    assert_eq!(data["parentId"], serde_json::Value::Null);
    assert_eq!(data["createdBy"], "alice");

    let history = data["modification"].as_array().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["lastModifiedBy"], "alice");
    assert_eq!(history[0]["name"], "alice display");
    assert!(history[0]["lastModifiedAt"].is_string());
}

#[tokio::test]
async fn test_single_folder_expands_one_level() {
    let app = TestApp::new();
    let root = app.create_folder("alice", "root", None).await;
    let child = app.create_folder("alice", "child", Some(root.as_str())).await;
    app.create_folder("alice", "grandchild", Some(child.as_str())).await;
    app.create_file("alice", &root, "a.png").await;

    let response = app
        .get(&format!("/api/fmgr/getSingleFolder?id={root}"), "alice")
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let data = &response.body["data"];
    assert_eq!(data["id"], root.as_str());
    assert_eq!(data["files"].as_array().unwrap().len(), 1);
    assert_eq!(data["parent"], serde_json::Value::Null);
    let children = data["children"].as_array().unwrap();
    assert_eq!(children.len(), 1);
    assert_eq!(children[0]["id"], child.as_str());

    let response = app
        .get(&format!("/api/fmgr/getSingleFolder?id={child}"), "alice")
        .await;
    assert_eq!(response.body["data"]["parent"]["id"], root.as_str());
}

#[tokio::test]
async fn test_rename_appends_entry() {
    let app = TestApp::new();
    let id = app.create_folder("alice", "Docs", None).await;

    let response = app
        .post(
            "/api/fmgr/updateFolder",
            json!({ "id": id, "name": "Documents" }),
            "alice",
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["name"], "Documents");
    assert_eq!(response.body["data"]["modification"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_rename_unknown_folder_is_not_found() {
    let app = TestApp::new();

    let response = app
        .post(
            "/api/fmgr/updateFolder",
            json!({ "id": "missing", "name": "x" }),
            "alice",
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["message"], "Folder not found");
}

#[tokio::test]
async fn test_delete_orphans_children_and_cascades_files() {
    let app = TestApp::new();
    let parent = app.create_folder("alice", "parent", None).await;
    let child = app.create_folder("alice", "child", Some(parent.as_str())).await;
    let file = app.create_file("alice", &parent, "a.png").await;

    let response = app
        .post("/api/fmgr/deleteFolder", json!({ "id": parent }), "alice")
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["message"], "Folder deleted successfully");

    let response = app
        .get(&format!("/api/fmgr/getSingleFile?id={file}"), "alice")
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app
        .get(&format!("/api/fmgr/getSingleFolder?id={child}"), "alice")
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["parentId"], parent.as_str());
    assert_eq!(response.body["data"]["parent"], serde_json::Value::Null);
}

#[tokio::test]
async fn test_recursive_delete_removes_descendants() {
    let mut config = AppConfig::in_memory();
    config.folders.recursive_delete = true;
    let app = TestApp::with_config(config);

    let root = app.create_folder("alice", "root", None).await;
    let child = app.create_folder("alice", "child", Some(root.as_str())).await;
    let grandchild = app.create_folder("alice", "grandchild", Some(child.as_str())).await;
    let file = app.create_file("alice", &grandchild, "deep.png").await;

    let response = app
        .post("/api/fmgr/deleteFolder", json!({ "id": root }), "alice")
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let folders = app.get("/api/fmgr/getAllFolders", "alice").await;
    assert!(folders.items().is_empty());
    let response = app
        .get(&format!("/api/fmgr/getSingleFile?id={file}"), "alice")
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_unknown_folder_is_not_found() {
    let app = TestApp::new();

    let response = app
        .post("/api/fmgr/deleteFolder", json!({ "id": "missing" }), "alice")
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_all_folders_is_owner_scoped_newest_first() {
    let app = TestApp::new();
    let first = app.create_folder("alice", "first", None).await;
    let second = app.create_folder("alice", "second", None).await;
    app.create_folder("bob", "bobs", None).await;

    let response = app.get("/api/fmgr/getAllFolders", "alice").await;

    assert_eq!(response.status, StatusCode::OK);
    let ids: Vec<&str> = response
        .items()
        .iter()
        .map(|f| f["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec![second.as_str(), first.as_str()]);
}

#[tokio::test]
async fn test_take_limits_listing_with_margin() {
    let app = TestApp::new();
    for i in 0..13 {
        app.create_folder("alice", &format!("f{i}"), None).await;
    }

    let limited = app.get("/api/fmgr/getAllFolders?take=1", "alice").await;
    assert_eq!(limited.items().len(), 11);

    let unlimited = app.get("/api/fmgr/getAllFolders?take=0", "alice").await;
    assert_eq!(unlimited.items().len(), 13);
}

#[tokio::test]
async fn test_single_folder_unknown_or_foreign_is_null() {
    let app = TestApp::new();
    let bobs = app.create_folder("bob", "private", None).await;

    let response = app.get("/api/fmgr/getSingleFolder?id=missing", "alice").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"], serde_json::Value::Null);

    let response = app
        .get(&format!("/api/fmgr/getSingleFolder?id={bobs}"), "alice")
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"], serde_json::Value::Null);
}

#[tokio::test]
async fn test_foreign_folder_mutations_are_not_found() {
    let app = TestApp::new();
    let bobs = app.create_folder("bob", "private", None).await;

    let rename = app
        .post(
            "/api/fmgr/updateFolder",
            json!({ "id": bobs, "name": "mine" }),
            "alice",
        )
        .await;
    assert_eq!(rename.status, StatusCode::NOT_FOUND);

    let delete = app
        .post("/api/fmgr/deleteFolder", json!({ "id": bobs }), "alice")
        .await;
    assert_eq!(delete.status, StatusCode::NOT_FOUND);

    assert_eq!(app.history_len("bob", &bobs).await, 1);
}

#[tokio::test]
async fn test_empty_folder_name_is_rejected() {
    let app = TestApp::new();

    let response = app
        .post("/api/fmgr/createFolder", json!({ "name": "" }), "alice")
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_malformed_body_is_rejected() {
    let app = TestApp::new();

    let response = app
        .post("/api/fmgr/updateFolder", json!({ "name": "no id" }), "alice")
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
