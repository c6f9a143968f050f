//! # Application State
//!
//! This module defines the shared state passed to every request handler
//! through axum's `State` extractor.
//!
//! ## The State Pattern
//! The database pool is opened once at startup, stored in `AppState`, and
//! cloned into each request. Cloning is cheap: the repositories sit behind
//! `Arc`, and `PgPool` is itself a handle to a shared pool.
//!
//! Handlers only see the repository traits, so tests can build an
//! `AppState` from in-memory doubles with [`AppState::new`].

use crate::config::Config;
use crate::db::{schema, RegistrationRepository, UserRepository};
use crate::password::PasswordHasher;
use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;

/// Shared application state
///
/// ## Thread Safety
/// Both repository traits require `Send + Sync`, so the same instances can
/// serve any number of concurrent requests. The application adds no locks
/// of its own; concurrency control is left to the connection pool.
#[derive(Clone)]
pub struct AppState {
    /// Storage for `/users`
    pub users: Arc<dyn UserRepository>,

    /// Storage for `/register`
    pub registrations: Arc<dyn RegistrationRepository>,

    /// bcrypt work factor used by `/register`
    pub hasher: PasswordHasher,
}

impl AppState {
    /// Assemble state from already-built dependencies
    pub fn new(
        users: Arc<dyn UserRepository>,
        registrations: Arc<dyn RegistrationRepository>,
        hasher: PasswordHasher,
    ) -> Self {
        Self {
            users,
            registrations,
            hasher,
        }
    }

    /// Connect to PostgreSQL and build production state
    ///
    /// This function:
    /// 1. Opens the process-wide connection pool
    /// 2. Creates the `users` and `registrations` tables if they are missing
    /// 3. Uses the pool as both repositories, with the default bcrypt cost
    ///
    /// # Errors
    /// Returns an error if the database is unreachable or schema sync fails.
    /// Both are fatal at startup.
    pub async fn connect(config: &Config) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .connect_with(config.connect_options())
            .await
            .context("Failed to connect to the database")?;
        tracing::info!("Successfully connected to the database!");

        schema::sync_schema(&pool)
            .await
            .context("Failed to create tables")?;

        let pool = Arc::new(pool);
        Ok(Self::new(pool.clone(), pool, PasswordHasher::default()))
    }
}
