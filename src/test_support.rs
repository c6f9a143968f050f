//! In-memory repositories and request helpers for handler tests.
//!
//! The doubles mimic the Postgres tables closely enough for the HTTP
//! contract: ids come from a counter starting at 1, email is unique per
//! table, and `fail_all` makes every call return a database error.

use crate::db::models::{Registration, User, UserPayload};
use crate::db::{RegistrationRepository, StoreError, StoreResult, UserRepository};
use crate::password::PasswordHasher;
use crate::routes::router;
use crate::state::AppState;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use sqlx::PgPool;
use http_body_util::BodyExt;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};
use tower::ServiceExt;

fn unavailable() -> StoreError {
    StoreError::Database(sqlx::Error::PoolTimedOut)
}

struct Table<T> {
    rows: BTreeMap<i64, T>,
    last_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }
}

impl<T> Table<T> {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }
}

#[derive(Default)]
pub struct MemoryUsers {
    table: Mutex<Table<User>>,
    failing: AtomicBool,
}

impl MemoryUsers {
    pub fn fail_all(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    pub fn count(&self) -> usize {
        self.table.lock().unwrap().rows.len()
    }

    fn check(&self) -> StoreResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        Ok(())
    }
}

fn email_taken(rows: &BTreeMap<i64, User>, email: &str, except: Option<i64>) -> bool {
    rows.values()
        .any(|u| u.email == email && Some(u.id) != except)
}

#[async_trait]
impl UserRepository for MemoryUsers {
    async fn create(&self, payload: &UserPayload) -> StoreResult<User> {
        self.check()?;
        let mut table = self.table.lock().unwrap();
        if email_taken(&table.rows, &payload.email, None) {
            return Err(StoreError::Conflict("users_email_key".into()));
        }
        let user = User {
            id: table.next_id(),
            name: payload.name.clone(),
            email: payload.email.clone(),
        };
        table.rows.insert(user.id, user.clone());
        Ok(user)
    }

    async fn list(&self) -> StoreResult<Vec<User>> {
        self.check()?;
        Ok(self.table.lock().unwrap().rows.values().cloned().collect())
    }

    async fn find(&self, id: i64) -> StoreResult<User> {
        self.check()?;
        self.table
            .lock()
            .unwrap()
            .rows
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn save(&self, user: &User) -> StoreResult<User> {
        self.check()?;
        let mut table = self.table.lock().unwrap();
        if email_taken(&table.rows, &user.email, Some(user.id)) {
            return Err(StoreError::Conflict("users_email_key".into()));
        }
        table.rows.insert(user.id, user.clone());
        table.last_id = table.last_id.max(user.id);
        Ok(user.clone())
    }

    async fn delete(&self, id: i64) -> StoreResult<u64> {
        self.check()?;
        let removed = self.table.lock().unwrap().rows.remove(&id);
        Ok(u64::from(removed.is_some()))
    }
}

#[derive(Default)]
pub struct MemoryRegistrations {
    table: Mutex<Table<Registration>>,
    failing: AtomicBool,
}

impl MemoryRegistrations {
    pub fn fail_all(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    pub fn rows(&self) -> Vec<Registration> {
        self.table.lock().unwrap().rows.values().cloned().collect()
    }
}

#[async_trait]
impl RegistrationRepository for MemoryRegistrations {
    async fn create(&self, email: &str, password_hash: &str) -> StoreResult<Registration> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        let mut table = self.table.lock().unwrap();
        if table.rows.values().any(|r| r.email == email) {
            return Err(StoreError::Conflict("registrations_email_key".into()));
        }
        if table.rows.values().any(|r| r.password == password_hash) {
            return Err(StoreError::Conflict("registrations_password_key".into()));
        }
        let registration = Registration {
            id: table.next_id(),
            email: email.to_string(),
            password: password_hash.to_string(),
        };
        table.rows.insert(registration.id, registration.clone());
        Ok(registration)
    }
}

/// State wired to fresh in-memory repositories and the cheapest bcrypt cost
pub struct TestApp {
    pub state: AppState,
    pub users: Arc<MemoryUsers>,
    pub registrations: Arc<MemoryRegistrations>,
}

impl TestApp {
    pub fn new() -> Self {
        let users = Arc::new(MemoryUsers::default());
        let registrations = Arc::new(MemoryRegistrations::default());
        let state = AppState::new(
            users.clone(),
            registrations.clone(),
            PasswordHasher::with_cost(4),
        );
        Self {
            state,
            users,
            registrations,
        }
    }

    /// Send one request through the full router
    pub async fn send(&self, method: Method, uri: &str, body: Option<&str>) -> TestResponse {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body.map_or_else(Body::empty, |b| Body::from(b.to_string())))
            .unwrap();

        let response = router(self.state.clone()).oneshot(request).await.unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = response.into_body().collect().await.unwrap().to_bytes();

        TestResponse {
            status,
            content_type,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: String,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

/// Pool for the `#[ignore]`d Postgres tests, with both tables created
///
/// Run them with `DATABASE_URL=postgres://... cargo test -- --ignored`
/// against a scratch database.
pub async fn postgres_pool() -> PgPool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must name a scratch database");
    let pool = PgPool::connect(&url).await.unwrap();
    crate::db::schema::sync_schema(&pool).await.unwrap();
    pool
}

/// An email no earlier test run has used
pub fn unique_email(tag: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{tag}-{nanos}@example.com")
}
