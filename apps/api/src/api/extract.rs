// Extractors whose rejections render as `ApiError` instead of axum's plain text

use axum::extract::{FromRequest, FromRequestParts};

use crate::api::errors::ApiError;

/// `axum::Json` with JSON error bodies
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct AppJson<T>(pub T);

/// `axum::extract::Path` with JSON error bodies
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct AppPath<T>(pub T);
