//! User lookups and first sign-in bookkeeping.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use fmgr_core::error::AppError;
use fmgr_core::result::AppResult;
use fmgr_core::types::UserId;
use fmgr_database::store::UserStore;
use fmgr_entity::user::{Identity, User};

use crate::context::RequestContext;

/// Read access to users, plus recording identities as they sign in.
#[derive(Debug, Clone)]
pub struct UserService {
    users: Arc<dyn UserStore>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    /// Record the identity's user row on its first sign-in. Existing rows
    /// are returned untouched.
    pub async fn register_sign_in(&self, identity: &Identity) -> AppResult<User> {
        if let Some(existing) = self.users.find_by_id(&identity.id).await? {
            return Ok(existing);
        }

        let user = self
            .users
            .insert_if_absent(&identity.to_user(Utc::now()))
            .await?;
        info!(user_id = %user.id, "User registered on first sign-in");
        Ok(user)
    }

    /// One user by ID.
    pub async fn get_user(&self, _ctx: &RequestContext, id: &UserId) -> AppResult<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Every known user.
    pub async fn list_users(&self, _ctx: &RequestContext) -> AppResult<Vec<User>> {
        self.users.find_all().await
    }
}
