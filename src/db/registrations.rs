//! # Registration Database Operations
//!
//! Registrations are write-only from the API's point of view: they are
//! inserted by `POST /register` and never read back, updated or deleted.

use crate::db::models::Registration;
use crate::db::StoreResult;
use async_trait::async_trait;
use sqlx::PgPool;

/// Storage operations for the `registrations` table
#[async_trait]
pub trait RegistrationRepository: Send + Sync {
    /// Insert a signup whose password has already been hashed
    ///
    /// A duplicate email (or, because of the legacy constraint, a duplicate
    /// hash) fails with `StoreError::Conflict`.
    async fn create(&self, email: &str, password_hash: &str) -> StoreResult<Registration>;
}

#[async_trait]
impl RegistrationRepository for PgPool {
    async fn create(&self, email: &str, password_hash: &str) -> StoreResult<Registration> {
        let registration = sqlx::query_as::<_, Registration>(
            "INSERT INTO registrations (email, password)
             VALUES ($1, $2)
             RETURNING id, email, password",
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(self)
        .await?;

        Ok(registration)
    }
}
