//! # User Handlers
//!
//! CRUD endpoints for the `users` table.
//!
//! ## Routes
//! - `POST /users`: create
//! - `GET /users`: list
//! - `GET /users/{id}`: fetch
//! - `PUT /users/{id}`: update
//! - `DELETE /users/{id}`: delete
//!
//! Everything after `/users/` is the id. An id that is not an integer
//! (including one that is not valid UTF-8 once percent-decoded, or one that
//! spans several segments) cannot match any row, so it is reported the same
//! way as a missing row: 404 "User not found".

use crate::db::models::{User, UserPayload};
use crate::error::{AppError, AppResult};
use crate::handlers::decode_json;
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    Json,
};

const USER_NOT_FOUND: &str = "User not found";

fn user_not_found() -> AppError {
    AppError::NotFound(USER_NOT_FOUND.to_string())
}

/// Turn the raw path remainder into a primary key
fn parse_id(path: Result<Path<String>, PathRejection>) -> AppResult<i64> {
    let Path(raw) = path.map_err(|e| {
        tracing::debug!("Unusable user id in path: {}", e);
        user_not_found()
    })?;
    raw.parse::<i64>().map_err(|_| user_not_found())
}

async fn load_user(state: &AppState, path: Result<Path<String>, PathRejection>) -> AppResult<User> {
    let id = parse_id(path)?;
    state
        .users
        .find(id)
        .await
        .map_err(AppError::lookup(USER_NOT_FOUND, "Failed to fetch user"))
}

/// Create a user
///
/// ## Route
/// POST /users
///
/// ## Request
/// ```json
/// { "name": "Alice", "email": "alice@example.com" }
/// ```
///
/// ## Response
/// 201 with the stored user, including its new `id`. A duplicate email is a
/// storage error (500).
pub async fn create_user(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<(StatusCode, Json<User>)> {
    let payload: UserPayload = decode_json(&body)?;

    let user = state
        .users
        .create(&payload)
        .await
        .map_err(AppError::storage("Failed to create user"))?;
    tracing::debug!(user_id = user.id, "Created user");

    Ok((StatusCode::CREATED, Json(user)))
}

/// List every user
///
/// ## Route
/// GET /users
///
/// Returns `[]` when the table is empty.
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<User>>> {
    let users = state
        .users
        .list()
        .await
        .map_err(AppError::storage("Failed to fetch users"))?;

    Ok(Json(users))
}

/// Fetch one user
///
/// ## Route
/// GET /users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> AppResult<Json<User>> {
    let user = load_user(&state, path).await?;
    Ok(Json(user))
}

/// Replace a user's name and email
///
/// ## Route
/// PUT /users/{id}
///
/// ## How it works
/// 1. Load the existing row (404 if it does not exist)
/// 2. Decode the body (400 if malformed)
/// 3. Overwrite name and email, keep the id
/// 4. Upsert by primary key
///
/// The lookup happens before decoding, so a missing user is reported as 404
/// even when the body is also invalid.
pub async fn update_user(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    body: Bytes,
) -> AppResult<Json<User>> {
    let mut user = load_user(&state, path).await?;

    let payload: UserPayload = decode_json(&body)?;
    user.apply(payload);

    let user = state
        .users
        .save(&user)
        .await
        .map_err(AppError::storage("Failed to update user"))?;
    tracing::debug!(user_id = user.id, "Updated user");

    Ok(Json(user))
}

/// Delete a user
///
/// ## Route
/// DELETE /users/{id}
///
/// 204 with no body when a row was removed, 404 when none matched.
pub async fn delete_user(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> AppResult<StatusCode> {
    let id = parse_id(path)?;

    let removed = state
        .users
        .delete(id)
        .await
        .map_err(AppError::storage("Failed to delete user"))?;

    if removed == 0 {
        return Err(user_not_found());
    }
    tracing::debug!(user_id = id, "Deleted user");

    Ok(StatusCode::NO_CONTENT)
}
