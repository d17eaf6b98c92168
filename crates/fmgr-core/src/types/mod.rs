//! Core type definitions used across the fmgr workspace.

pub mod id;

pub use id::*;
