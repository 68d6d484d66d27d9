//! Settings read from the environment (optionally seeded from `.env`).

use crate::error::ConfigError;
use std::net::SocketAddr;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub database_url: String,
    pub max_connections: u32,
    /// Schema holding `categories`, `ingredients`, `menus` and `recipes`.
    pub schema: String,
    pub bind_addr: SocketAddr,
    pub storage: StorageBackend,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup. `DATABASE_URL` wins over the `DB_*` parts.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let storage = match get("STORAGE").as_deref() {
            None | Some("postgres") => StorageBackend::Postgres,
            Some("memory") => StorageBackend::Memory,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: "STORAGE",
                    value: other.to_string(),
                })
            }
        };

        let database_url = match get("DATABASE_URL") {
            Some(url) => url,
            None if storage == StorageBackend::Memory => String::new(),
            None => {
                let name = get("DB_NAME").ok_or(ConfigError::Missing("DB_NAME"))?;
                let host = get("DB_HOST").unwrap_or_else(|| "127.0.0.1".into());
                let port = get("DB_PORT").unwrap_or_else(|| "5432".into());
                let user = get("DB_USER").unwrap_or_else(|| "postgres".into());
                match get("DB_PASSWORD") {
                    Some(password) => format!("postgres://{}:{}@{}:{}/{}", user, password, host, port, name),
                    None => format!("postgres://{}@{}:{}/{}", user, host, port, name),
                }
            }
        };

        let max_connections = match get("DB_MAX_CONNECTIONS") {
            Some(v) => v.parse().map_err(|_| ConfigError::Invalid {
                key: "DB_MAX_CONNECTIONS",
                value: v,
            })?,
            None => 5,
        };

        let bind_addr = match get("BIND_ADDR") {
            Some(v) => v.parse().map_err(|_| ConfigError::Invalid { key: "BIND_ADDR", value: v })?,
            None => SocketAddr::from(([0, 0, 0, 0], 8000)),
        };

        Ok(Settings {
            database_url,
            max_connections,
            schema: get("ERP_SCHEMA").unwrap_or_else(|| "public".into()),
            bind_addr,
            storage,
        })
    }
}
