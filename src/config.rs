//! # Configuration Management
//!
//! This module loads the database settings from a local `.env` file.
//! Unlike a typical 12-factor setup the file is mandatory: the server refuses
//! to start without it.
//!
//! ## Environment Variables
//! - `DB_HOST`: PostgreSQL host name or address
//! - `DB_PORT`: PostgreSQL port
//! - `DB_USER`: Role to connect as
//! - `DB_PASSWORD`: Password for that role
//! - `DB_NAME`: Database to open
//!
//! The HTTP listener always binds port 8080 on all interfaces.

use anyhow::{Context, Result};
use sqlx::postgres::{PgConnectOptions, PgSslMode};
use std::env;
use std::fmt;

/// Port the HTTP server listens on.
pub const SERVER_PORT: u16 = 8080;

/// Application configuration
///
/// Holds the connection settings for the relational store. All fields are
/// public so they can be inspected in tests and logs.
///
/// `Debug` is implemented by hand so that logging the config at startup
/// never prints the database password.
#[derive(Clone)]
pub struct Config {
    /// Database server host (e.g. "localhost")
    pub db_host: String,

    /// Database server port (usually 5432)
    pub db_port: u16,

    /// Database role
    pub db_user: String,

    /// Password for `db_user`
    pub db_password: String,

    /// Name of the database holding the `users` and `registrations` tables
    pub db_name: String,
}

impl Config {
    /// Load configuration from the `.env` file and the environment
    ///
    /// This function:
    /// 1. Loads variables from `.env` in the working directory using dotenvy
    /// 2. Reads each `DB_*` variable
    /// 3. Parses `DB_PORT` as a port number
    ///
    /// ## Example .env file
    /// ```text
    /// DB_HOST=localhost
    /// DB_PORT=5432
    /// DB_USER=postgres
    /// DB_PASSWORD=postgres
    /// DB_NAME=gocrud
    /// ```
    ///
    /// # Errors
    /// Returns an error if the `.env` file is absent or unreadable, if any
    /// variable is missing, or if `DB_PORT` is not a valid port.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().context("Error loading .env file")?;

        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source
    ///
    /// `from_env` passes the process environment; tests pass a map.
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &str| lookup(key).with_context(|| format!("{key} must be set"));

        let db_port = require("DB_PORT")?;
        let db_port = db_port
            .trim()
            .parse::<u16>()
            .with_context(|| format!("DB_PORT must be a valid port number, got '{db_port}'"))?;

        Ok(Config {
            db_host: require("DB_HOST")?,
            db_port,
            db_user: require("DB_USER")?,
            db_password: require("DB_PASSWORD")?,
            db_name: require("DB_NAME")?,
        })
    }

    /// Connection options for the PostgreSQL pool
    ///
    /// TLS is disabled, matching `sslmode=disable` in a libpq DSN.
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.db_host)
            .port(self.db_port)
            .username(&self.db_user)
            .password(&self.db_password)
            .database(&self.db_name)
            .ssl_mode(PgSslMode::Disable)
    }

    /// Socket address for `tokio::net::TcpListener::bind()`
    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", SERVER_PORT)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("db_host", &self.db_host)
            .field("db_port", &self.db_port)
            .field("db_user", &self.db_user)
            .field("db_password", &"<redacted>")
            .field("db_name", &self.db_name)
            .finish()
    }
}
