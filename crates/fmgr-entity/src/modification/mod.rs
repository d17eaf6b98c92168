//! Folder modification log entities.

pub mod model;

pub use model::{ModificationEntry, NewModification};
