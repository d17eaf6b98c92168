//! Shared fixtures for service tests, all on the in-memory store.

use fmgr_core::config::FolderPolicyConfig;
use fmgr_core::types::{FolderId, UserId};
use fmgr_database::Stores;
use fmgr_entity::file::File;
use fmgr_entity::folder::Folder;
use fmgr_entity::user::Identity;

use crate::context::RequestContext;
use crate::file::{CreateFileRequest, FileService};
use crate::folder::{CreateFolderRequest, FolderService};
use crate::modification::ModificationLog;
use crate::user::UserService;

pub const ALICE: &str = "alice";
pub const BOB: &str = "bob";

pub struct Harness {
    pub folders: FolderService,
    pub files: FileService,
    pub users: UserService,
    pub log: ModificationLog,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_policy(FolderPolicyConfig::default())
    }

    pub fn with_policy(policy: FolderPolicyConfig) -> Self {
        let stores = Stores::memory();
        let log = ModificationLog::new(stores.modifications.clone());
        Self {
            folders: FolderService::new(
                stores.folders.clone(),
                stores.files.clone(),
                policy.clone(),
            ),
            files: FileService::new(
                stores.files.clone(),
                stores.folders.clone(),
                log.clone(),
                policy,
            ),
            users: UserService::new(stores.users.clone()),
            log,
        }
    }

    pub fn ctx(&self, user: &str) -> RequestContext {
        RequestContext::new(Identity {
            id: UserId::new(user),
            name: Some(format!("{user} display")),
            email: format!("{user}@example.com"),
            image: None,
        })
    }

    pub async fn folder(
        &self,
        ctx: &RequestContext,
        name: &str,
        parent: Option<&FolderId>,
    ) -> Folder {
        self.folders
            .create(
                ctx,
                CreateFolderRequest {
                    name: Some(name.to_string()),
                    parent_id: parent.cloned(),
                },
            )
            .await
            .expect("create folder")
    }

    pub async fn file(&self, ctx: &RequestContext, folder: &FolderId, name: &str) -> File {
        self.files
            .create(
                ctx,
                CreateFileRequest {
                    name: name.to_string(),
                    url: format!("https://utfs.io/f/{name}"),
                    mime_type: "image/png".to_string(),
                    folder_id: folder.clone(),
                },
            )
            .await
            .expect("create file")
    }
}
