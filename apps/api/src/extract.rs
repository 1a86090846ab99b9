use axum::extract::{FromRequest, FromRequestParts};

use crate::errors::AppError;

/// `Json` extractor whose rejections render as `AppError::Validation`,
/// so malformed payloads get the same error body as every other failure.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// `Path` extractor with the same error body; a malformed id is a 400 `VALIDATION_ERROR`.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);
