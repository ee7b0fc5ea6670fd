//! Body, path and query extractors whose rejections use the API error envelope.

use axum::extract::{FromRequest, FromRequestParts};

use crate::errors::AppError;

/// JSON request body. Malformed, mistyped or incomplete bodies become
/// [`AppError::Validation`].
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

/// Path parameters. Unparseable segments become [`AppError::Validation`].
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct PathParam<T>(pub T);

/// Query string parameters. Unparseable values become [`AppError::Validation`].
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct QueryParams<T>(pub T);
