//! Claims carried by the identity provider's tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use fmgr_core::types::UserId;
use fmgr_entity::user::Identity;

/// JWT claims payload asserted by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the provider's user ID.
    pub sub: String,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Email address.
    pub email: String,
    /// Avatar URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl Claims {
    /// Returns the user ID from the subject claim.
    pub fn user_id(&self) -> UserId {
        UserId::new(self.sub.clone())
    }

    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }

    /// The principal these claims describe.
    pub fn identity(&self) -> Identity {
        Identity {
            id: self.user_id(),
            name: self.name.clone(),
            email: self.email.clone(),
            image: self.picture.clone(),
        }
    }
}

impl From<Claims> for Identity {
    fn from(claims: Claims) -> Self {
        Identity {
            id: UserId::new(claims.sub),
            name: claims.name,
            email: claims.email,
            image: claims.picture,
        }
    }
}
