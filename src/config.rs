use anyhow::Context;
use serde::Deserialize;

pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost:5432/frich_clone?sslmode=disable";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source, so tests don't touch the process env.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .or_else(|| lookup("DB_CONNECTION_STRING"))
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.into());
        let max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(v) => v
                .parse::<u32>()
                .with_context(|| format!("DB_MAX_CONNECTIONS must be a number, got {v:?}"))?,
            None => 10,
        };
        let host = lookup("APP_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = match lookup("APP_PORT") {
            Some(v) => v
                .parse::<u16>()
                .with_context(|| format!("APP_PORT must be a port number, got {v:?}"))?,
            None => 8080,
        };
        Ok(Self {
            database_url,
            max_connections,
            host,
            port,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
