//! Request extractors

use axum::extract::FromRequest;

use crate::error::ApiError;

/// JSON body extractor whose rejections render as `ApiError`
///
/// A malformed body or a missing field becomes a 422 `validation_error`
/// instead of axum's plain-text rejection.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);
