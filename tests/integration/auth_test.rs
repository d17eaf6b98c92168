//! Integration tests for bearer-token authentication and user lookups.

mod helpers;

use axum::http::StatusCode;

use fmgr_auth::JwtEncoder;
use fmgr_database::UserStore;
use helpers::TestApp;

#[tokio::test]
async fn test_missing_token_is_unauthenticated() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/fmgr/getAllFolders", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), "UNAUTHENTICATED");
    assert_eq!(response.body["message"], "Authentication required");
}

#[tokio::test]
async fn test_non_bearer_header_is_rejected() {
    let app = TestApp::new();
    let request = axum::http::Request::builder()
        .uri("/api/fmgr/getAllFiles")
        .header("Authorization", "Basic YWxpY2U6c2VjcmV0")
        .body(axum::body::Body::empty())
        .unwrap();

    let response = tower::ServiceExt::oneshot(app.router.clone(), request)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_mutation_without_token_touches_nothing() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/fmgr/createFolder",
            Some(serde_json::json!({ "name": "anon" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let users = app.state.stores.users.find_all().await.unwrap();
    assert!(users.is_empty());
}

#[tokio::test]
async fn test_garbage_token_is_rejected() {
    let app = TestApp::new();

    let response = app
        .request("GET", "/api/fmgr/getAllFiles", None, Some("not-a-jwt"))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_signed_with_other_secret_is_rejected() {
    let app = TestApp::new();
    let mut other = app.config.auth.clone();
    other.jwt_secret = "a-different-secret".to_string();
    let token = JwtEncoder::new(&other)
        .issue(&TestApp::identity("mallory"))
        .unwrap();

    let response = app
        .request("GET", "/api/fmgr/getAllFiles", None, Some(token.as_str()))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_token_is_rejected() {
    let app = TestApp::new();
    let token = JwtEncoder::new(&app.config.auth)
        .issue_with_ttl(&TestApp::identity("alice"), chrono::Duration::minutes(-10))
        .unwrap();

    let response = app
        .request("GET", "/api/fmgr/getAllFiles", None, Some(token.as_str()))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_first_request_records_user() {
    let app = TestApp::new();

    let response = app.get("/api/user/getUser?id=alice", "alice").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["email"], "alice@example.com");
    assert_eq!(response.body["data"]["name"], "alice display");
}

#[tokio::test]
async fn test_get_all_users_lists_signed_in_identities() {
    let app = TestApp::new();
    app.get("/api/fmgr/getAllFolders", "alice").await;
    app.get("/api/fmgr/getAllFolders", "bob").await;

    let response = app.get("/api/user/getAllUsers", "alice").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.items().len(), 2);
}

#[tokio::test]
async fn test_unknown_user_is_not_found() {
    let app = TestApp::new();

    let response = app.get("/api/user/getUser?id=nobody", "alice").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["message"], "User not found");
}

#[tokio::test]
async fn test_health_needs_no_token() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");
    assert_eq!(response.body["data"]["backend"], "memory");
}
