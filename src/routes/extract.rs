//! Extractors whose rejections surface as [`AppError::InvalidInput`].

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// `Path` that rejects with a JSON error body
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);

/// `Query` that rejects with a JSON error body
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);

/// `Json` request body that rejects with a JSON error body
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
