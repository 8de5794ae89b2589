//! Request handlers.
//!
//! Each submodule provides async handler functions (create, list, get_by_id,
//! update, patch, delete) for a single entity type. Handlers delegate to the
//! corresponding repository in `spendlog_db`, map errors via [`AppError`],
//! and format results through [`crate::presenter`].
//!
//! [`AppError`]: crate::error::AppError

pub mod category;
pub mod expense;
pub mod note;
