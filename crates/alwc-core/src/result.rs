//! Convenience result type alias.

use crate::error::AppError;

/// A specialized `Result` type used by every ALWC crate.
pub type AppResult<T> = Result<T, AppError>;
