use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::users::{
    password::{hash_password, verify_password, PasswordError},
    repo::{DatastoreError, UserDatastore},
    repo_types::{NewUser, PublicUser},
};

/// Outcomes a store operation can fail with.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("email already in use")]
    DuplicateEmail,

    #[error("user {0} not found")]
    NotFound(i64),

    #[error("password hashing failed")]
    HashingFailure(#[source] PasswordError),

    #[error("storage failure")]
    StorageFailure(#[source] DatastoreError),
}

impl From<DatastoreError> for StoreError {
    fn from(e: DatastoreError) -> Self {
        match e {
            DatastoreError::UniqueViolation { .. } => StoreError::DuplicateEmail,
            other => StoreError::StorageFailure(other),
        }
    }
}

impl From<PasswordError> for StoreError {
    fn from(e: PasswordError) -> Self {
        StoreError::HashingFailure(e)
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Mediates every read and write of user records.
///
/// Holds nothing between calls except the injected datastore handle; every
/// method borrows a connection for its statements and gives it back on return.
#[derive(Clone)]
pub struct UserStore {
    db: Arc<dyn UserDatastore>,
}

impl UserStore {
    pub fn new(db: Arc<dyn UserDatastore>) -> Self {
        Self { db }
    }

    pub async fn create(&self, name: &str, email: &str, password: &str) -> StoreResult<i64> {
        let password_hash = hash_password(password)?;
        let new_user = NewUser {
            name: name.to_string(),
            email: email.to_string(),
            password_hash,
        };
        match self.db.insert(&new_user).await {
            Ok(id) => {
                info!(user_id = id, email = %email, "user created");
                Ok(id)
            }
            Err(DatastoreError::UniqueViolation { constraint }) => {
                warn!(email = %email, %constraint, "email already registered");
                Err(StoreError::DuplicateEmail)
            }
            Err(e) => Err(StoreError::StorageFailure(e)),
        }
    }

    pub async fn get(&self, id: i64) -> StoreResult<PublicUser> {
        self.db
            .find_by_id(id)
            .await
            .map_err(StoreError::StorageFailure)?
            .ok_or_else(|| {
                warn!(user_id = id, "user not found");
                StoreError::NotFound(id)
            })
    }

    /// Overwrites name and email. The stored password hash is left alone.
    pub async fn update(&self, id: i64, name: &str, email: &str) -> StoreResult<()> {
        if !self
            .db
            .exists(id)
            .await
            .map_err(StoreError::StorageFailure)?
        {
            warn!(user_id = id, "update of missing user");
            return Err(StoreError::NotFound(id));
        }

        let affected = self.db.update(id, name, email).await?;
        if affected == 0 {
            // deleted between the existence check and the write
            warn!(user_id = id, "user vanished before update");
            return Err(StoreError::NotFound(id));
        }
        info!(user_id = id, "user updated");
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> StoreResult<()> {
        let affected = self
            .db
            .delete(id)
            .await
            .map_err(StoreError::StorageFailure)?;
        if affected == 0 {
            warn!(user_id = id, "delete of missing user");
            return Err(StoreError::NotFound(id));
        }
        info!(user_id = id, "user deleted");
        Ok(())
    }

    pub async fn list(&self) -> StoreResult<Vec<PublicUser>> {
        self.db.list().await.map_err(StoreError::StorageFailure)
    }

    /// Checks a plaintext against the stored hash without exposing the hash.
    pub async fn verify_password(&self, id: i64, password: &str) -> StoreResult<bool> {
        let hash = self
            .db
            .password_hash(id)
            .await
            .map_err(StoreError::StorageFailure)?
            .ok_or(StoreError::NotFound(id))?;
        Ok(verify_password(password, &hash)?)
    }
}
