//! Shared test helpers for integration tests.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use sqlx::PgPool;

use fmgr_api::{AppState, build_router};
use fmgr_auth::JwtEncoder;
use fmgr_core::config::{AppConfig, DatabaseConfig};
use fmgr_core::types::{FolderId, UserId};
use fmgr_database::migration::run_migrations;
use fmgr_database::{DatabasePool, FileStore, FolderStore, Stores, UserStore};
use fmgr_entity::file::{CreateFile, File};
use fmgr_entity::folder::{CreateFolder, Folder};
use fmgr_entity::modification::NewModification;
use fmgr_entity::user::{Identity, User};

/// Environment variable naming the PostgreSQL database for repository tests
pub const TEST_DATABASE_URL: &str = "FMGR_TEST_DATABASE_URL";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Shared state, for reaching the stores directly
    pub state: AppState,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Create a new test application on a fresh in-memory store
    pub fn new() -> Self {
        Self::with_config(AppConfig::in_memory())
    }

    /// Create a test application with a tweaked configuration
    pub fn with_config(config: AppConfig) -> Self {
        let state = AppState::new(config.clone(), Stores::memory());
        let router = build_router(state.clone());
        Self {
            router,
            state,
            config,
        }
    }

    /// The identity used for `user` in these tests
    pub fn identity(user: &str) -> Identity {
        Identity {
            id: UserId::new(user),
            name: Some(format!("{user} display")),
            email: format!("{user}@example.com"),
            image: None,
        }
    }

    /// Sign a bearer token for `user`
    pub fn token(&self, user: &str) -> String {
        JwtEncoder::new(&self.config.auth)
            .issue(&Self::identity(user))
            .expect("Failed to issue token")
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    /// GET as `user`
    pub async fn get(&self, path: &str, user: &str) -> TestResponse {
        let token = self.token(user);
        self.request("GET", path, None, Some(token.as_str())).await
    }

    /// POST a JSON body as `user`
    pub async fn post(&self, path: &str, body: Value, user: &str) -> TestResponse {
        let token = self.token(user);
        self.request("POST", path, Some(body), Some(token.as_str())).await
    }

    /// Create a folder as `user` and return its id
    pub async fn create_folder(&self, user: &str, name: &str, parent: Option<&str>) -> String {
        let response = self
            .post(
                "/api/fmgr/createFolder",
                serde_json::json!({ "name": name, "parentId": parent }),
                user,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
        response.id()
    }

    /// Create a file as `user` and return its id.
    ///
    /// `createFile` answers with a message, so the id is read back from the
    /// folder listing, where the new file comes first.
    pub async fn create_file(&self, user: &str, folder_id: &str, name: &str) -> String {
        let response = self
            .post(
                "/api/fmgr/createFile",
                serde_json::json!({
                    "name": name,
                    "url": format!("https://utfs.io/f/{name}"),
                    "type": "image/png",
                    "folderId": folder_id,
                }),
                user,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
        assert_eq!(response.body["data"]["message"], "File added successfully");

        let listing = self
            .get(
                &format!("/api/fmgr/getAllFilesOfFolder?folderId={folder_id}"),
                user,
            )
            .await;
        let newest = &listing.items()[0];
        assert_eq!(newest["name"], name);
        newest["id"].as_str().expect("file id").to_string()
    }

    /// Length of a folder's modification log, read through the API
    pub async fn history_len(&self, user: &str, folder_id: &str) -> usize {
        let response = self
            .get(&format!("/api/fmgr/getSingleFolder?id={folder_id}"), user)
            .await;
        response.body["data"]["modification"]
            .as_array()
            .map(Vec::len)
            .expect("folder has a modification array")
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// `data.id` of a success body
    pub fn id(&self) -> String {
        self.body["data"]["id"]
            .as_str()
            .expect("response has data.id")
            .to_string()
    }

    /// `data` as an array
    pub fn items(&self) -> &Vec<Value> {
        self.body["data"].as_array().expect("data is an array")
    }

    /// `error` code of a failure body
    pub fn error_code(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }
}

/// Live PostgreSQL stores for repository tests.
///
/// Rows are keyed by fresh ids, so tests share the database without wiping
/// each other's data. Each test removes what it recorded with [`Self::clean`].
pub struct TestDatabase {
    /// Pool for direct queries
    pub pool: PgPool,
    /// Repositories over the same pool
    pub stores: Stores,
    users: std::sync::Mutex<Vec<UserId>>,
}

impl TestDatabase {
    /// Connect and migrate, or `None` when no test database is configured
    pub async fn connect() -> Option<Self> {
        let Ok(url) = std::env::var(TEST_DATABASE_URL) else {
            eprintln!("{TEST_DATABASE_URL} is not set, skipping PostgreSQL test");
            return None;
        };

        let config = DatabaseConfig {
            url,
            max_connections: 4,
            min_connections: 0,
            ..DatabaseConfig::default()
        };
        let pool = DatabasePool::connect(&config)
            .await
            .expect("Failed to connect to test database");
        run_migrations(pool.pool())
            .await
            .expect("Failed to run migrations");

        Some(Self {
            pool: pool.pool().clone(),
            stores: Stores::postgres(pool),
            users: std::sync::Mutex::new(Vec::new()),
        })
    }

    /// A user row that no other test shares
    pub fn new_user(label: &str) -> User {
        let id = UserId::new(format!("{label}-{}", FolderId::generate()));
        User {
            email: format!("{id}@example.com"),
            id,
            name: Some(label.to_string()),
            email_verified: None,
            image: None,
        }
    }

    /// Record a fresh user and return its id
    pub async fn user(&self, label: &str) -> UserId {
        let user = Self::new_user(label);
        self.track(&user.id);
        self.stores
            .users
            .insert_if_absent(&user)
            .await
            .expect("Failed to record user")
            .id
    }

    /// Remember a user id for [`Self::clean`]
    pub fn track(&self, id: &UserId) {
        self.users.lock().unwrap().push(id.clone());
    }

    /// Create a folder owned by `owner`
    pub async fn folder(&self, owner: &UserId, name: &str, parent: Option<&FolderId>) -> Folder {
        self.stores
            .folders
            .insert(
                &CreateFolder {
                    name: Some(name.to_string()),
                    parent_id: parent.cloned(),
                    created_by: owner.clone(),
                },
                &Self::entry(owner),
            )
            .await
            .expect("Failed to create folder")
    }

    /// Create a file owned by `owner` inside `folder`
    pub async fn file(&self, owner: &UserId, folder: &FolderId, name: &str) -> File {
        self.stores
            .files
            .insert(&Self::new_file(owner, folder, name))
            .await
            .expect("Failed to create file")
    }

    /// Insert data for a file record
    pub fn new_file(owner: &UserId, folder: &FolderId, name: &str) -> CreateFile {
        CreateFile {
            name: name.to_string(),
            url: format!("https://utfs.io/f/{name}"),
            mime_type: "image/png".to_string(),
            folder_id: folder.clone(),
            created_by: owner.clone(),
        }
    }

    /// A history entry attributed to `actor`
    pub fn entry(actor: &UserId) -> NewModification {
        NewModification {
            actor_id: actor.clone(),
            actor_name: Some(format!("{actor} display")),
        }
    }

    /// Delete every row created by the users this test recorded
    pub async fn clean(&self) {
        let ids: Vec<String> = self
            .users
            .lock()
            .unwrap()
            .iter()
            .map(|id| id.as_str().to_string())
            .collect();

        for statement in [
            "DELETE FROM files WHERE created_by = ANY($1)",
            "DELETE FROM folders WHERE created_by = ANY($1)",
            "DELETE FROM users WHERE id = ANY($1)",
        ] {
            sqlx::query(statement)
                .bind(&ids)
                .execute(&self.pool)
                .await
                .expect("Failed to clean test rows");
        }
    }
}
