use std::sync::Arc;

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::config::AppConfig;
use crate::users::{repo::PgUserDatastore, UserStore};

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<AppConfig>,
    pub users: UserStore,
}

impl AppState {
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        let db = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;
        let users = UserStore::new(Arc::new(PgUserDatastore::new(db.clone())));
        Ok(Self {
            db,
            config: Arc::new(config),
            users,
        })
    }

    /// State backed by an arbitrary datastore. The pool is lazy and never used.
    #[cfg(test)]
    pub fn fake(datastore: Arc<dyn crate::users::repo::UserDatastore>) -> Self {
        let config = AppConfig::from_lookup(|_| None).expect("default config");
        let db = PgPoolOptions::new()
            .connect_lazy(&config.database_url)
            .expect("lazy pool ok");
        Self {
            db,
            config: Arc::new(config),
            users: UserStore::new(datastore),
        }
    }
}
