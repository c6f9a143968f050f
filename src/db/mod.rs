//! # Database Module
//!
//! This module organizes all database-related code into submodules:
//! - `models`: Row types and request payloads (User, Registration)
//! - `schema`: Create-if-absent table setup run at startup
//! - `users`: CRUD operations for users
//! - `registrations`: Insert operation for credentialed signups
//!
//! ## Repositories
//! Handlers never touch `PgPool` directly. They go through the
//! [`UserRepository`] and [`RegistrationRepository`] traits, which are
//! implemented for `PgPool` here and by in-memory doubles in tests.

pub mod models;
pub mod registrations;
pub mod schema;
pub mod users;

pub use registrations::RegistrationRepository;
pub use users::UserRepository;

use thiserror::Error;

/// Failure reported by a repository
#[derive(Error, Debug)]
pub enum StoreError {
    /// The targeted row does not exist
    #[error("record not found")]
    NotFound,

    /// A unique constraint rejected the write
    #[error("unique constraint violated: {0}")]
    Conflict(String),

    /// Any other database failure (connectivity, protocol, decoding)
    #[error("database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                StoreError::Conflict(db.message().to_string())
            }
            e => StoreError::Database(e),
        }
    }
}

/// Result type for repository calls
pub type StoreResult<T> = Result<T, StoreError>;
