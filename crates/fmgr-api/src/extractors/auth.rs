//! `AuthUser` extractor: pulls the identity token from the Authorization
//! header, verifies it, and records the sign-in.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use tracing::debug;

use fmgr_core::error::AppError;
use fmgr_service::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated user context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl AuthUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let identity = match bearer_token(parts)? {
            Some(token) => Some(state.jwt_decoder.identity(token)?),
            None => None,
        };
        let ctx = RequestContext::authenticated(identity)?;

        // First sight of a principal creates its user row.
        state.user_service.register_sign_in(&ctx.identity).await?;
        debug!(user_id = %ctx.user_id(), "Authenticated request");

        Ok(AuthUser(ctx))
    }
}

/// The bearer token, or `None` when no Authorization header was sent.
fn bearer_token(parts: &Parts) -> Result<Option<&str>, AppError> {
    let Some(value) = parts.headers.get(AUTHORIZATION) else {
        return Ok(None);
    };

    value
        .to_str()
        .ok()
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(Some)
        .ok_or_else(|| AppError::unauthenticated("Invalid Authorization header format"))
}
