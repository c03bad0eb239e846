//! Convenience result type alias for CareBridge.

use crate::error::AppError;

/// A specialized `Result` type for CareBridge operations.
pub type AppResult<T> = Result<T, AppError>;
