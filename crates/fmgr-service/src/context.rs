//! Request context carrying the authenticated identity.

use chrono::{DateTime, Utc};

use fmgr_core::error::AppError;
use fmgr_core::types::UserId;
use fmgr_entity::modification::NewModification;
use fmgr_entity::user::Identity;

/// Context for the current authenticated request.
///
/// Built by the API layer once the bearer token is verified and passed into
/// every service method, so each operation knows who is acting.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// The principal asserted by the identity provider.
    pub identity: Identity,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(identity: Identity) -> Self {
        Self {
            identity,
            request_time: Utc::now(),
        }
    }

    /// Require an identity, failing with `Unauthenticated` before any store
    /// access happens.
    pub fn authenticated(identity: Option<Identity>) -> Result<Self, AppError> {
        identity
            .map(Self::new)
            .ok_or_else(|| AppError::unauthenticated("Authentication required"))
    }

    /// The acting user's ID.
    pub fn user_id(&self) -> &UserId {
        &self.identity.id
    }

    /// Attribution for a modification entry.
    pub fn actor(&self) -> NewModification {
        NewModification::by(&self.identity)
    }
}
