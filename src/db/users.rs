use crate::db::models::{User, UserPayload};
use crate::db::StoreResult;
use async_trait::async_trait;
use sqlx::PgPool;

/// Storage operations for the `users` table
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user; the id is assigned by storage
    async fn create(&self, payload: &UserPayload) -> StoreResult<User>;

    /// All users in id order
    async fn list(&self) -> StoreResult<Vec<User>>;

    /// Look up one user by primary key
    async fn find(&self, id: i64) -> StoreResult<User>;

    /// Write every field of `user`, inserting the row if its id is unknown
    async fn save(&self, user: &User) -> StoreResult<User>;

    /// Delete by primary key, returning the number of rows removed
    async fn delete(&self, id: i64) -> StoreResult<u64>;
}

#[async_trait]
impl UserRepository for PgPool {
    async fn create(&self, payload: &UserPayload) -> StoreResult<User> {
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (name, email)
             VALUES ($1, $2)
             RETURNING id, name, email",
        )
        .bind(&payload.name)
        .bind(&payload.email)
        .fetch_one(self)
        .await?;

        Ok(user)
    }

    async fn list(&self) -> StoreResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>("SELECT id, name, email FROM users ORDER BY id")
            .fetch_all(self)
            .await?;

        Ok(users)
    }

    async fn find(&self, id: i64) -> StoreResult<User> {
        let user = sqlx::query_as::<_, User>("SELECT id, name, email FROM users WHERE id = $1")
            .bind(id)
            .fetch_one(self)
            .await?;

        Ok(user)
    }

    async fn save(&self, user: &User) -> StoreResult<User> {
        let saved = sqlx::query_as::<_, User>(
            "INSERT INTO users (id, name, email)
             VALUES ($1, $2, $3)
             ON CONFLICT (id) DO UPDATE
             SET name = EXCLUDED.name, email = EXCLUDED.email
             RETURNING id, name, email",
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .fetch_one(self)
        .await?;

        Ok(saved)
    }

    async fn delete(&self, id: i64) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(self)
            .await?;

        Ok(result.rows_affected())
    }
}
