//! # HTTP Request Handlers
//!
//! This module contains the route handlers.
//!
//! ## Submodules
//! - `users`: CRUD over `/users` and `/users/{id}`
//! - `register`: credentialed signup at `/register`
//!
//! ## Handler Pattern
//! Handlers are async functions that:
//! 1. Extract the shared state, path parameters and the raw body
//! 2. Decode the body with [`decode_json`] when they need one
//! 3. Call a repository
//! 4. Return `AppResult<impl IntoResponse>`
//!
//! Bodies are taken as `Bytes` instead of axum's `Json` extractor. That way
//! every decode failure is a 400 regardless of `Content-Type`, and a handler
//! can decide when to decode (update looks the user up first).

pub mod register;
pub mod users;

use crate::error::{AppError, AppResult};
use axum::body::Bytes;
use serde::de::DeserializeOwned;

/// Decode a JSON request body
///
/// # Errors
/// `AppError::BadRequest("Invalid request body")` for malformed JSON or a
/// body that does not match `T`.
pub fn decode_json<T: DeserializeOwned>(body: &Bytes) -> AppResult<T> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::debug!("Rejected request body: {}", e);
        AppError::BadRequest("Invalid request body".to_string())
    })
}

/// Fallback for a known path hit with an unsupported method
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
