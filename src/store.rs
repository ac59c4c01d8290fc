use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use time::OffsetDateTime;

use crate::auth::password;

pub const DEMO_EMAIL: &str = "demo@example.com";
pub const DEMO_NAME: &str = "Demo User";
pub const DEMO_PASSWORD: &str = "demo123";

#[derive(Debug, Clone, Serialize)]
pub struct UserRecord {
    pub id: u64,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("email already registered")]
    DuplicateEmail,
}

/// Process-lifetime credential store. Object safe so a database-backed
/// implementation can replace the in-memory one without touching handlers.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Option<UserRecord>;

    /// Insert a new user, assigning the next id. Fails if the email is taken.
    async fn insert(
        &self,
        email: &str,
        name: &str,
        password_hash: &str,
    ) -> Result<UserRecord, StoreError>;

    /// Clear all records and reseed the demo account.
    async fn reset(&self);

    /// Remove one record; returns whether it was present.
    async fn remove(&self, email: &str) -> bool;

    async fn list_emails(&self) -> Vec<String>;
}

struct Inner {
    users: HashMap<String, UserRecord>,
    next_id: u64,
}

impl Inner {
    fn seeded() -> Self {
        let demo = UserRecord {
            id: 1,
            email: DEMO_EMAIL.into(),
            password_hash: password::hash_password(DEMO_PASSWORD),
            name: DEMO_NAME.into(),
            created_at: OffsetDateTime::now_utc(),
        };
        let mut users = HashMap::new();
        users.insert(demo.email.clone(), demo);
        Self { users, next_id: 1 }
    }
}

pub struct MemoryUserStore {
    inner: RwLock<Inner>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner::seeded()),
        }
    }
}

impl Default for MemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Option<UserRecord> {
        let inner = self.inner.read().expect("store lock poisoned");
        inner.users.get(email).cloned()
    }

    async fn insert(
        &self,
        email: &str,
        name: &str,
        password_hash: &str,
    ) -> Result<UserRecord, StoreError> {
        // Duplicate check and id assignment share the write lock, so
        // concurrent signups cannot collide on either.
        let mut inner = self.inner.write().expect("store lock poisoned");
        if inner.users.contains_key(email) {
            return Err(StoreError::DuplicateEmail);
        }
        inner.next_id += 1;
        let user = UserRecord {
            id: inner.next_id,
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            name: name.to_string(),
            created_at: OffsetDateTime::now_utc(),
        };
        inner.users.insert(user.email.clone(), user.clone());
        Ok(user)
    }

    async fn reset(&self) {
        let mut inner = self.inner.write().expect("store lock poisoned");
        *inner = Inner::seeded();
    }

    async fn remove(&self, email: &str) -> bool {
        let mut inner = self.inner.write().expect("store lock poisoned");
        inner.users.remove(email).is_some()
    }

    async fn list_emails(&self) -> Vec<String> {
        let inner = self.inner.read().expect("store lock poisoned");
        inner.users.keys().cloned().collect()
    }
}
