use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;

use crate::users::repo_types::{NewUser, PublicUser};

/// What the datastore reports back. Callers never see driver error codes.
#[derive(Debug, Error)]
pub enum DatastoreError {
    #[error("unique constraint violated ({constraint})")]
    UniqueViolation { constraint: String },

    #[error("datastore error: {0}")]
    Other(String),
}

impl From<sqlx::Error> for DatastoreError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                DatastoreError::UniqueViolation {
                    constraint: db.constraint().unwrap_or("unknown").to_string(),
                }
            }
            _ => DatastoreError::Other(e.to_string()),
        }
    }
}

/// Persistence capability for user records. Each call is one statement.
#[async_trait]
pub trait UserDatastore: Send + Sync {
    /// Insert a row and return the id the datastore assigned.
    async fn insert(&self, user: &NewUser) -> Result<i64, DatastoreError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<PublicUser>, DatastoreError>;

    async fn exists(&self, id: i64) -> Result<bool, DatastoreError>;

    /// Overwrite name and email. Returns the number of rows affected.
    async fn update(&self, id: i64, name: &str, email: &str) -> Result<u64, DatastoreError>;

    /// Returns the number of rows affected.
    async fn delete(&self, id: i64) -> Result<u64, DatastoreError>;

    /// All users ordered by id.
    async fn list(&self) -> Result<Vec<PublicUser>, DatastoreError>;

    async fn password_hash(&self, id: i64) -> Result<Option<String>, DatastoreError>;
}

#[derive(Clone)]
pub struct PgUserDatastore {
    pool: PgPool,
}

impl PgUserDatastore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDatastore for PgUserDatastore {
    async fn insert(&self, user: &NewUser) -> Result<i64, DatastoreError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO users (name, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<PublicUser>, DatastoreError> {
        let user = sqlx::query_as::<_, PublicUser>(
            r#"
            SELECT id, name, email
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn exists(&self, id: i64) -> Result<bool, DatastoreError> {
        let found = sqlx::query_scalar::<_, bool>(
            r#"SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)"#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(found)
    }

    async fn update(&self, id: i64, name: &str, email: &str) -> Result<u64, DatastoreError> {
        let res = sqlx::query(
            r#"
            UPDATE users
               SET name = $1, email = $2
             WHERE id = $3
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected())
    }

    async fn delete(&self, id: i64) -> Result<u64, DatastoreError> {
        let res = sqlx::query(r#"DELETE FROM users WHERE id = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected())
    }

    async fn list(&self) -> Result<Vec<PublicUser>, DatastoreError> {
        // fetch_all fails as a whole on the first bad row; no partial lists
        let rows = sqlx::query_as::<_, PublicUser>(
            r#"
            SELECT id, name, email
              FROM users
             ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn password_hash(&self, id: i64) -> Result<Option<String>, DatastoreError> {
        let hash = sqlx::query_scalar::<_, String>(
            r#"SELECT password_hash FROM users WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(hash)
    }
}
