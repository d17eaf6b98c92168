//! In-memory store using dashmap.
//!
//! Mirrors the PostgreSQL schema closely enough for tests and local demos:
//! deleting a folder cascades to its files and history, file inserts require
//! the folder to exist, and user emails are unique. Row order comes from a
//! shared sequence, so "newest first" is insertion order reversed.

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use tracing::debug;

use fmgr_core::error::AppError;
use fmgr_core::result::AppResult;
use fmgr_core::types::{FileId, FolderId, UserId};
use fmgr_entity::file::{CreateFile, File};
use fmgr_entity::folder::{CreateFolder, Folder};
use fmgr_entity::modification::{ModificationEntry, NewModification};
use fmgr_entity::user::User;

use crate::store::{FileStore, FolderStore, ModificationStore, UserStore};

/// A row plus its insertion sequence.
#[derive(Debug, Clone)]
struct Stamped<T> {
    seq: i64,
    row: T,
}

#[derive(Debug, Default)]
struct Tables {
    users: DashMap<UserId, Stamped<User>>,
    /// Folder rows are stored without history; it is attached on read.
    folders: DashMap<FolderId, Stamped<Folder>>,
    files: DashMap<FileId, Stamped<File>>,
    modifications: DashMap<FolderId, Vec<ModificationEntry>>,
    sequence: AtomicI64,
}

/// Process-local implementation of every store trait.
///
/// Cloning is cheap and clones share the same tables. Lock order is always
/// folders before modifications before files.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Tables>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn next_seq(&self) -> i64 {
        self.tables.sequence.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn history_of(&self, id: &FolderId) -> Vec<ModificationEntry> {
        self.tables
            .modifications
            .get(id)
            .map(|entries| entries.value().clone())
            .unwrap_or_default()
    }

    fn hydrate(&self, mut folder: Folder) -> Folder {
        folder.modification = self.history_of(&folder.id);
        folder
    }

    /// Folders matching `predicate`, newest first, with history attached.
    fn folders_where(&self, predicate: impl Fn(&Folder) -> bool) -> Vec<Folder> {
        let mut rows: Vec<Stamped<Folder>> = self
            .tables
            .folders
            .iter()
            .filter(|entry| predicate(&entry.value().row))
            .map(|entry| entry.value().clone())
            .collect();
        rows.sort_by(|a, b| b.seq.cmp(&a.seq));
        rows.into_iter().map(|s| self.hydrate(s.row)).collect()
    }

    /// Files matching `predicate`, newest first.
    fn files_where(&self, predicate: impl Fn(&File) -> bool) -> Vec<File> {
        let mut rows: Vec<Stamped<File>> = self
            .tables
            .files
            .iter()
            .filter(|entry| predicate(&entry.value().row))
            .map(|entry| entry.value().clone())
            .collect();
        rows.sort_by(|a, b| b.seq.cmp(&a.seq));
        rows.into_iter().map(|s| s.row).collect()
    }

    fn push_entry(&self, folder_id: &FolderId, entry: &NewModification) -> ModificationEntry {
        let appended = entry.clone().into_entry(self.next_seq(), Utc::now());
        self.tables
            .modifications
            .entry(folder_id.clone())
            .or_default()
            .push(appended.clone());
        appended
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_id(&self, id: &UserId) -> AppResult<Option<User>> {
        Ok(self.tables.users.get(id).map(|u| u.row.clone()))
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        let mut users: Vec<User> = self
            .tables
            .users
            .iter()
            .map(|entry| entry.value().row.clone())
            .collect();
        users.sort_by(|a, b| a.email.cmp(&b.email));
        Ok(users)
    }

    async fn insert_if_absent(&self, user: &User) -> AppResult<User> {
        if let Some(existing) = self.tables.users.get(&user.id) {
            return Ok(existing.row.clone());
        }

        let email_taken = self
            .tables
            .users
            .iter()
            .any(|entry| entry.key() != &user.id && entry.value().row.email == user.email);
        if email_taken {
            return Err(AppError::conflict(format!(
                "Email '{}' is already registered",
                user.email
            )));
        }

        let seq = self.next_seq();
        let stored = self
            .tables
            .users
            .entry(user.id.clone())
            .or_insert_with(|| Stamped {
                seq,
                row: user.clone(),
            });
        Ok(stored.row.clone())
    }
}

#[async_trait]
impl FolderStore for MemoryStore {
    async fn insert(&self, data: &CreateFolder, initial: &NewModification) -> AppResult<Folder> {
        let now = Utc::now();
        let folder = Folder {
            id: FolderId::generate(),
            name: data.name.clone(),
            created_at: now,
            updated_at: now,
            created_by: Some(data.created_by.clone()),
            parent_id: data.parent_id.clone(),
            modification: Vec::new(),
        };

        // History first, so a concurrent reader never sees a folder without it.
        let entry = initial.clone().into_entry(self.next_seq(), now);
        self.tables
            .modifications
            .insert(folder.id.clone(), vec![entry.clone()]);
        self.tables.folders.insert(
            folder.id.clone(),
            Stamped {
                seq: self.next_seq(),
                row: folder.clone(),
            },
        );

        debug!(folder_id = %folder.id, "Stored folder in memory");
        Ok(Folder {
            modification: vec![entry],
            ..folder
        })
    }

    async fn find_by_id(&self, id: &FolderId) -> AppResult<Option<Folder>> {
        let folder = self.tables.folders.get(id).map(|f| f.row.clone());
        Ok(folder.map(|f| self.hydrate(f)))
    }

    async fn find_by_owner(&self, owner: &UserId, limit: Option<i64>) -> AppResult<Vec<Folder>> {
        let mut folders = self.folders_where(|f| f.is_owned_by(owner));
        if let Some(limit) = limit {
            folders.truncate(usize::try_from(limit.max(0)).unwrap_or(usize::MAX));
        }
        Ok(folders)
    }

    async fn find_children(&self, parent: &FolderId) -> AppResult<Vec<Folder>> {
        Ok(self.folders_where(|f| f.parent_id.as_ref() == Some(parent)))
    }

    async fn find_descendants(&self, id: &FolderId) -> AppResult<Vec<Folder>> {
        let mut seen: HashSet<FolderId> = HashSet::from([id.clone()]);
        let mut queue: VecDeque<FolderId> = VecDeque::from([id.clone()]);
        let mut found = Vec::new();

        while let Some(current) = queue.pop_front() {
            for child in self.folders_where(|f| f.parent_id.as_ref() == Some(&current)) {
                if seen.insert(child.id.clone()) {
                    queue.push_back(child.id.clone());
                    found.push(child);
                }
            }
        }
        Ok(found)
    }

    async fn rename(
        &self,
        id: &FolderId,
        name: &str,
        entry: &NewModification,
    ) -> AppResult<Option<Folder>> {
        let renamed = {
            let Some(mut stored) = self.tables.folders.get_mut(id) else {
                return Ok(None);
            };
            stored.row.name = Some(name.to_string());
            stored.row.updated_at = Utc::now();
            self.push_entry(id, entry);
            stored.row.clone()
        };
        Ok(Some(self.hydrate(renamed)))
    }

    async fn delete(&self, id: &FolderId) -> AppResult<bool> {
        if self.tables.folders.remove(id).is_none() {
            return Ok(false);
        }
        self.tables.modifications.remove(id);
        self.tables
            .files
            .retain(|_, file| file.row.folder_id.as_ref() != Some(id));
        Ok(true)
    }
}

#[async_trait]
impl FileStore for MemoryStore {
    async fn insert(&self, data: &CreateFile) -> AppResult<File> {
        // Holding the folder row keeps a concurrent delete from orphaning the file.
        let Some(_folder) = self.tables.folders.get(&data.folder_id) else {
            return Err(AppError::not_found("Folder not found"));
        };

        let now = Utc::now();
        let file = File {
            id: FileId::generate(),
            name: Some(data.name.clone()),
            url: Some(data.url.clone()),
            mime_type: Some(data.mime_type.clone()),
            created_at: now,
            updated_at: now,
            created_by: Some(data.created_by.clone()),
            folder_id: Some(data.folder_id.clone()),
        };
        self.tables.files.insert(
            file.id.clone(),
            Stamped {
                seq: self.next_seq(),
                row: file.clone(),
            },
        );
        Ok(file)
    }

    async fn find_by_id(&self, id: &FileId) -> AppResult<Option<File>> {
        Ok(self.tables.files.get(id).map(|f| f.row.clone()))
    }

    async fn find_by_owner(&self, owner: &UserId) -> AppResult<Vec<File>> {
        Ok(self.files_where(|f| f.is_owned_by(owner)))
    }

    async fn find_by_folder(&self, folder: &FolderId) -> AppResult<Vec<File>> {
        Ok(self.files_where(|f| f.folder_id.as_ref() == Some(folder)))
    }

    async fn find_by_ids(&self, ids: &[FileId]) -> AppResult<Vec<File>> {
        let wanted: HashSet<&FileId> = ids.iter().collect();
        Ok(self.files_where(|f| wanted.contains(&f.id)))
    }

    async fn rename(&self, id: &FileId, name: &str) -> AppResult<Option<File>> {
        Ok(self.tables.files.get_mut(id).map(|mut stored| {
            stored.row.name = Some(name.to_string());
            stored.row.updated_at = Utc::now();
            stored.row.clone()
        }))
    }

    async fn delete(&self, id: &FileId) -> AppResult<bool> {
        Ok(self.tables.files.remove(id).is_some())
    }

    async fn delete_many(&self, ids: &[FileId]) -> AppResult<u64> {
        let removed = ids
            .iter()
            .filter(|id| self.tables.files.remove(*id).is_some())
            .count();
        Ok(removed as u64)
    }
}

#[async_trait]
impl ModificationStore for MemoryStore {
    async fn append(
        &self,
        folder_id: &FolderId,
        entry: &NewModification,
    ) -> AppResult<ModificationEntry> {
        let Some(mut folder) = self.tables.folders.get_mut(folder_id) else {
            return Err(AppError::not_found("Folder not found"));
        };
        let appended = self.push_entry(folder_id, entry);
        folder.row.updated_at = appended.occurred_at;
        Ok(appended)
    }

    async fn find_by_folder(&self, folder_id: &FolderId) -> AppResult<Vec<ModificationEntry>> {
        Ok(self.history_of(folder_id))
    }
}
