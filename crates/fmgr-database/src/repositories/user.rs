//! User repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use fmgr_core::error::{AppError, ErrorKind};
use fmgr_core::result::AppResult;
use fmgr_core::types::UserId;
use fmgr_entity::user::User;

use crate::store::UserStore;

/// Repository for identity-provider users.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_id(&self, id: &UserId) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user", e))
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY email ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list users", e))
    }

    async fn insert_if_absent(&self, user: &User) -> AppResult<User> {
        let inserted = sqlx::query_as::<_, User>(
            "INSERT INTO users (id, name, email, email_verified, image) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (id) DO NOTHING RETURNING *",
        )
        .bind(&user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.email_verified)
        .bind(&user.image)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.constraint() == Some("users_email_key") => {
                AppError::conflict(format!("Email '{}' is already registered", user.email))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to record user", e),
        })?;

        match inserted {
            Some(user) => Ok(user),
            None => self
                .find_by_id(&user.id)
                .await?
                .ok_or_else(|| AppError::internal("User vanished after insert conflict")),
        }
    }
}
