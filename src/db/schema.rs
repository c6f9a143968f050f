//! # Schema Sync
//!
//! Creates the `users` and `registrations` tables if they are missing.
//! There is no migration history: existing tables are left exactly as they
//! are, and columns are never added or altered.

use sqlx::PgPool;

const CREATE_USERS: &str = "CREATE TABLE IF NOT EXISTS users (
    id BIGSERIAL PRIMARY KEY,
    name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE
)";

// The unique constraint on `password` is kept so this DDL matches tables
// already deployed by the previous service.
const CREATE_REGISTRATIONS: &str = "CREATE TABLE IF NOT EXISTS registrations (
    id BIGSERIAL PRIMARY KEY,
    email TEXT NOT NULL UNIQUE,
    password TEXT NOT NULL UNIQUE
)";

/// Ensure both tables exist
///
/// Runs once at startup, before the listener is bound.
///
/// # Errors
/// Returns the database error if either statement fails.
pub async fn sync_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    for ddl in [CREATE_USERS, CREATE_REGISTRATIONS] {
        sqlx::query(ddl).execute(pool).await?;
    }

    tracing::info!("Schema sync complete (users, registrations)");
    Ok(())
}
