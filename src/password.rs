//! # Credential Hashing
//!
//! Plaintext passwords are replaced with a bcrypt hash before they reach the
//! database. bcrypt generates a random salt per call and embeds it, together
//! with the cost, in the `$2b$...` output string.

use crate::error::{AppError, AppResult};

/// bcrypt hasher with a fixed work factor
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl Default for PasswordHasher {
    /// The production work factor, `bcrypt::DEFAULT_COST`
    fn default() -> Self {
        Self {
            cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl PasswordHasher {
    /// A hasher with a custom cost. Tests use the minimum (4) to stay fast.
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }

    /// Hash `plaintext`
    ///
    /// bcrypt is deliberately slow, so the work runs on tokio's blocking pool
    /// instead of an async worker thread.
    ///
    /// # Errors
    /// `AppError::Hashing` if bcrypt rejects the input or cost,
    /// `AppError::Internal` if the blocking task panics.
    pub async fn hash(&self, plaintext: String) -> AppResult<String> {
        let cost = self.cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(plaintext, cost))
            .await
            .map_err(|e| AppError::Internal(format!("Hashing task failed: {}", e)))?
            .map_err(AppError::from)
    }
}
