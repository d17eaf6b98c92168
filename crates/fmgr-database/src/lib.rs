//! # fmgr-database
//!
//! Persistence for fmgr: the store traits every service depends on, the
//! PostgreSQL repositories implementing them, a process-local in-memory
//! implementation, connection pooling, and embedded migrations.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;
pub mod stores;

pub use connection::DatabasePool;
pub use memory::MemoryStore;
pub use store::{FileStore, FolderStore, ModificationStore, UserStore};
pub use stores::Stores;
