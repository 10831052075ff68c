//! Convenience result type alias for Warden.

use crate::error::AppError;

/// A specialized `Result` type for Warden operations.
pub type AppResult<T> = Result<T, AppError>;
