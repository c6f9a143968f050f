//! # User CRUD Server
//!
//! A small HTTP service exposing CRUD over users plus a credentialed signup
//! endpoint, backed by PostgreSQL.
//!
//! ## Endpoints
//! - `POST /users`, `GET /users`
//! - `GET /users/{id}`, `PUT /users/{id}`, `DELETE /users/{id}`
//! - `POST /register`

// Module declarations
mod config;      // Database settings from the .env file
mod db;          // Models, schema sync and repositories
mod error;       // Error type and HTTP error responses
mod handlers;    // HTTP request handlers
mod password;    // bcrypt credential hashing
mod routes;      // Method + path dispatch
mod state;       // Shared application state

#[cfg(test)]
mod test_support;

use crate::config::{Config, SERVER_PORT};
use crate::state::AppState;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main application entry point
///
/// This function:
/// 1. Sets up logging
/// 2. Loads configuration from `.env`
/// 3. Connects to the database and creates missing tables
/// 4. Builds the router
/// 5. Starts the HTTP server on port 8080
///
/// Any failure along the way is fatal: the error is returned from `main` and
/// the process exits non-zero.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Default: info for dependencies, debug for this crate and request traces
    // (sqlx logs each statement at debug). Override with RUST_LOG.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "info,user_crud_server=debug,tower_http=debug,sqlx=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    tracing::info!("Configuration loaded: {:?}", config);

    // One pool for the whole process, shared by every handler
    let app_state = AppState::connect(&config).await?;

    let app = routes::router(app_state);

    let bind_addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Server is running on port {}...", SERVER_PORT);

    axum::serve(listener, app).await?;

    Ok(())
}
