//! Request extractors whose rejections use the [`AppError`] JSON shape.

use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use spendlog_core::error::CoreError;

use crate::error::AppError;

/// `axum::Json` with rejections reported as JSON error bodies.
///
/// A body that parses but does not fit the DTO (missing field, wrong type)
/// is a `VALIDATION_ERROR`; anything else (bad syntax, wrong content type)
/// is a `BAD_REQUEST`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(err) => {
                AppError::Core(CoreError::Validation(err.body_text()))
            }
            other => AppError::BadRequest(other.body_text()),
        }
    }
}
