//! Process-local store backed by concurrent maps.

pub mod store;

pub use store::MemoryStore;
