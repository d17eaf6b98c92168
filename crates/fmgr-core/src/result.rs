//! Convenience result type alias for fmgr.

use crate::error::AppError;

/// A specialized `Result` type for fmgr operations.
pub type AppResult<T> = Result<T, AppError>;
