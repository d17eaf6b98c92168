//! # fmgr-entity
//!
//! Domain entity models for fmgr. Every struct in this crate represents a
//! database table row or a projection of one. Row entities derive
//! `sqlx::FromRow` and serialize with camelCase field names, which is the
//! wire contract the presentation layer consumes.

pub mod file;
pub mod folder;
pub mod modification;
pub mod user;
