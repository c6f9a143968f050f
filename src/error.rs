//! # Error Handling
//!
//! This module defines the application error type and how each variant is
//! turned into an HTTP response.
//!
//! ## Response format
//! Errors are written as plain text: the message followed by a newline, with
//! `Content-Type: text/plain; charset=utf-8`. Clients of the previous service
//! match on these bodies (e.g. `"User not found\n"`), so the wording of each
//! message is part of the API.
//!
//! Storage and hashing failures carry their cause for logging only; the body
//! never includes it.

use crate::db::StoreError;
use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Application-wide error type
///
/// The `Display` output of every variant is exactly the text sent to the
/// client, so the `#[error(...)]` strings must not include internal details.
#[derive(Error, Debug)]
pub enum AppError {
    /// The request body could not be decoded into the expected shape (400)
    #[error("{0}")]
    BadRequest(String),

    /// A primary-key lookup or delete matched no row (404)
    #[error("{0}")]
    NotFound(String),

    /// The path exists but not for this HTTP method (405)
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Any storage failure other than not-found (500)
    ///
    /// `message` names the operation that failed ("Failed to create user");
    /// `source` is only logged.
    #[error("{message}")]
    Storage {
        message: &'static str,
        #[source]
        source: StoreError,
    },

    /// bcrypt could not hash the password (500)
    #[error("Failed to hash password")]
    Hashing(#[from] bcrypt::BcryptError),

    /// Unexpected failures that are not tied to storage or hashing (500)
    #[error("Internal server error")]
    Internal(String),
}

impl AppError {
    /// Wrap a storage failure with the message shown to the client
    ///
    /// Meant for `map_err`:
    /// ```rust,ignore
    /// state.users.list().await.map_err(AppError::storage("Failed to fetch users"))?;
    /// ```
    pub fn storage(message: &'static str) -> impl FnOnce(StoreError) -> AppError {
        move |source| AppError::Storage { message, source }
    }

    /// Map a lookup failure: `NotFound` keeps its meaning, anything else is a
    /// storage error with `message`
    pub fn lookup(not_found: &'static str, message: &'static str) -> impl FnOnce(StoreError) -> AppError {
        move |source| match source {
            StoreError::NotFound => AppError::NotFound(not_found.to_string()),
            source => AppError::Storage { message, source },
        }
    }

    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Storage { .. } | AppError::Hashing(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Convert AppError into an HTTP response
///
/// 1. Log server-side failures with their cause
/// 2. Pick the status code
/// 3. Write the message as a plaintext body
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Storage { message, source } => {
                tracing::error!(error = ?source, "{}", message);
            }
            AppError::Hashing(e) => {
                tracing::error!(error = ?e, "Password hashing failed");
            }
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
            }
            _ => {}
        }

        let mut response = (self.status(), format!("{}\n", self)).into_response();
        let headers = response.headers_mut();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        );
        headers.insert(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        );
        response
    }
}

/// Convenience alias for handler and service results
pub type AppResult<T> = Result<T, AppError>;
