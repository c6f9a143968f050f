//! # Database Models
//!
//! Row types for the `users` and `registrations` tables, plus the JSON
//! payloads clients send to create or change them.
//!
//! Row types derive `Serialize` (for responses) and `sqlx::FromRow` (for
//! query results). Payload types only derive `Deserialize`: a client cannot
//! choose an `id`, and any extra fields in the body are ignored.
//!
//! Payload fields that are missing or `null` decode as empty strings. Only
//! malformed JSON or a field of the wrong type is rejected.

use serde::{Deserialize, Deserializer, Serialize};

/// Decode an optional, nullable string field as `""` when absent
fn empty_if_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// A user record
///
/// ## Example JSON
/// ```json
/// { "id": 1, "name": "Alice", "email": "alice@example.com" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct User {
    /// Primary key, assigned by the database (`BIGSERIAL`)
    pub id: i64,

    /// Free-text display name
    pub name: String,

    /// Email address, unique across all users
    pub email: String,
}

impl User {
    /// Replace name and email wholesale, keeping the id
    pub fn apply(&mut self, payload: UserPayload) {
        self.name = payload.name;
        self.email = payload.email;
    }
}

/// Body of `POST /users` and `PUT /users/{id}`
#[derive(Debug, Clone, Deserialize)]
pub struct UserPayload {
    #[serde(default, deserialize_with = "empty_if_null")]
    pub name: String,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub email: String,
}

/// A credentialed signup
///
/// `password` always holds the bcrypt hash, never the plaintext.
///
/// ## Example JSON
/// ```json
/// {
///   "id": 1,
///   "email": "a@x.com",
///   "password": "$2b$12$..."
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Registration {
    /// Primary key, assigned by the database
    pub id: i64,

    /// Email address, unique across all registrations
    pub email: String,

    /// bcrypt hash of the submitted password
    pub password: String,
}

/// Body of `POST /register`
///
/// Holds the plaintext password; it is hashed before anything is stored.
#[derive(Deserialize)]
pub struct RegistrationPayload {
    #[serde(default, deserialize_with = "empty_if_null")]
    pub email: String,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub password: String,
}
