//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use fmgr_core::types::UserId;

/// An identity the application trusts for ownership attribution.
///
/// Rows are written once, on the identity's first sign-in, and never
/// updated or deleted afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Identifier issued by the identity provider.
    pub id: UserId,
    /// Display name.
    pub name: Option<String>,
    /// Email address (unique).
    pub email: String,
    /// When the provider verified the email.
    pub email_verified: Option<DateTime<Utc>>,
    /// Avatar URL.
    pub image: Option<String>,
}

/// The authenticated principal of a request, as asserted by the identity
/// provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Provider-issued user id.
    pub id: UserId,
    /// Display name, snapshotted into modification entries.
    pub name: Option<String>,
    /// Email address.
    pub email: String,
    /// Avatar URL.
    pub image: Option<String>,
}

impl Identity {
    /// Build the user row recorded on first sign-in.
    pub fn to_user(&self, verified_at: DateTime<Utc>) -> User {
        User {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            email_verified: Some(verified_at),
            image: self.image.clone(),
        }
    }
}
