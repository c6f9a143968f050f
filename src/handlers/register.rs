//! # Registration Handler
//!
//! Credentialed signup: the password is hashed with bcrypt and the
//! `(email, hash)` pair is stored in the `registrations` table.

use crate::db::models::{Registration, RegistrationPayload};
use crate::error::{AppError, AppResult};
use crate::handlers::decode_json;
use crate::state::AppState;
use axum::{body::Bytes, extract::State, http::StatusCode, Json};

/// Register a new account
///
/// ## Route
/// POST /register
///
/// ## Request
/// ```json
/// { "email": "a@x.com", "password": "secret" }
/// ```
///
/// ## Response
/// 201 with the stored registration. The `password` field in the response is
/// the bcrypt hash, not the submitted plaintext.
///
/// ## Errors
/// - 400 "Invalid request body": malformed JSON or a non-string field
/// - 500 "Failed to hash password": bcrypt failed
/// - 500 "Failed to create user": storage error, including a duplicate email
pub async fn register(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<(StatusCode, Json<Registration>)> {
    let RegistrationPayload { email, password } = decode_json(&body)?;

    let password_hash = state.hasher.hash(password).await?;

    let registration = state
        .registrations
        .create(&email, &password_hash)
        .await
        .map_err(AppError::storage("Failed to create user"))?;
    tracing::info!(registration_id = registration.id, "Registered account");

    Ok((StatusCode::CREATED, Json(registration)))
}
