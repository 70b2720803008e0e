//! In-memory `UserDatastore` used by the store and handler tests.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::users::repo::{DatastoreError, UserDatastore};
use crate::users::repo_types::{NewUser, PublicUser};

struct Row {
    name: String,
    email: String,
    password_hash: String,
}

#[derive(Default)]
struct Tables {
    next_id: i64,
    users: BTreeMap<i64, Row>,
}

#[derive(Default)]
pub struct MemoryDatastore {
    tables: RwLock<Tables>,
    broken: AtomicBool,
}

impl MemoryDatastore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following call fail the way a lost connection would.
    pub fn break_connection(&self) {
        self.broken.store(true, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), DatastoreError> {
        if self.broken.load(Ordering::SeqCst) {
            return Err(DatastoreError::Other("connection refused".into()));
        }
        Ok(())
    }

    fn email_taken(tables: &Tables, email: &str, except: Option<i64>) -> bool {
        tables
            .users
            .iter()
            .any(|(id, row)| Some(*id) != except && row.email == email)
    }
}

fn unique_violation() -> DatastoreError {
    DatastoreError::UniqueViolation {
        constraint: "users_email_key".into(),
    }
}

#[async_trait]
impl UserDatastore for MemoryDatastore {
    async fn insert(&self, user: &NewUser) -> Result<i64, DatastoreError> {
        self.check()?;
        let mut t = self.tables.write().await;
        if Self::email_taken(&t, &user.email, None) {
            return Err(unique_violation());
        }
        t.next_id += 1;
        let id = t.next_id;
        t.users.insert(
            id,
            Row {
                name: user.name.clone(),
                email: user.email.clone(),
                password_hash: user.password_hash.clone(),
            },
        );
        Ok(id)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<PublicUser>, DatastoreError> {
        self.check()?;
        let t = self.tables.read().await;
        Ok(t.users.get(&id).map(|r| PublicUser {
            id,
            name: r.name.clone(),
            email: r.email.clone(),
        }))
    }

    async fn exists(&self, id: i64) -> Result<bool, DatastoreError> {
        self.check()?;
        Ok(self.tables.read().await.users.contains_key(&id))
    }

    async fn update(&self, id: i64, name: &str, email: &str) -> Result<u64, DatastoreError> {
        self.check()?;
        let mut t = self.tables.write().await;
        if Self::email_taken(&t, email, Some(id)) {
            return Err(unique_violation());
        }
        match t.users.get_mut(&id) {
            Some(row) => {
                row.name = name.to_string();
                row.email = email.to_string();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: i64) -> Result<u64, DatastoreError> {
        self.check()?;
        let removed = self.tables.write().await.users.remove(&id);
        Ok(u64::from(removed.is_some()))
    }

    async fn list(&self) -> Result<Vec<PublicUser>, DatastoreError> {
        self.check()?;
        let t = self.tables.read().await;
        Ok(t.users
            .iter()
            .map(|(id, r)| PublicUser {
                id: *id,
                name: r.name.clone(),
                email: r.email.clone(),
            })
            .collect())
    }

    async fn password_hash(&self, id: i64) -> Result<Option<String>, DatastoreError> {
        self.check()?;
        let t = self.tables.read().await;
        Ok(t.users.get(&id).map(|r| r.password_hash.clone()))
    }
}
