use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// User as it leaves the store. There is no password field to leak.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct PublicUser {
    pub id: i64,       // database-assigned, never reused
    pub name: String,
    pub email: String, // unique across users
}

/// Row to insert. The hash is computed by the store, never by callers.
#[derive(Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String, // Argon2 PHC string
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password_hash", &"[REDACTED]")
            .finish()
    }
}
