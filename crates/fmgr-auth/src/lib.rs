//! # fmgr-auth
//!
//! Validates the identity provider's HS256 bearer tokens and turns them
//! into an [`Identity`](fmgr_entity::user::Identity). Also issues tokens
//! for local development and tests.

pub mod jwt;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
