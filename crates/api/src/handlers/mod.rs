//! Request handlers for the two catalog collections.
//!
//! Each submodule provides async handler functions (create, read,
//! read_all, update, delete) for one collection. Handlers validate the
//! payload field-by-field against store state, delegate persistence to the
//! repositories in `multiverse_db`, and map errors via [`AppError`].
//!
//! [`AppError`]: crate::error::AppError

pub mod character;
pub mod location;

use multiverse_core::error::CoreError;

use crate::error::AppError;

pub(crate) fn validation(msg: impl Into<String>) -> AppError {
    AppError::Core(CoreError::Validation(msg.into()))
}

pub(crate) fn conflict(msg: impl Into<String>) -> AppError {
    AppError::Core(CoreError::Conflict(msg.into()))
}
