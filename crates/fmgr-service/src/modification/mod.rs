//! Per-folder activity trail.

pub mod log;

pub use log::ModificationLog;
