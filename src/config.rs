use std::env;

use thiserror::Error;

/// Development fallback for the token secret
const DEFAULT_JWT_SECRET: &str = "dev-secret-key";

/// Where teams and coursework are stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Storage {
    Postgres,
    /// Process-local store, empty on start
    Memory,
}

impl Storage {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Storage::Postgres),
            "memory" | "in_memory" => Ok(Storage::Memory),
            other => Err(ConfigError::InvalidStorage(other.to_string())),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("DATABASE_URL must be set when STORAGE=postgres")]
    MissingDatabaseUrl,

    #[error("Unknown STORAGE backend: {0}")]
    InvalidStorage(String),

    #[error("{name} is not a valid number: {value}")]
    InvalidNumber { name: &'static str, value: String },
}

/// Service configuration read from the environment
#[derive(Debug, Clone)]
pub struct Config {
    pub storage: Storage,
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub bind_addr: String,
    pub jwt_secret: String,
}

impl Config {
    /// Load `.env` if present, then read the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let storage = match lookup("STORAGE") {
            Some(value) => Storage::parse(&value)?,
            None => Storage::Postgres,
        };

        let database_url = lookup("DATABASE_URL").filter(|url| !url.is_empty());
        if storage == Storage::Postgres && database_url.is_none() {
            return Err(ConfigError::MissingDatabaseUrl);
        }

        let database_max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidNumber {
                name: "DATABASE_MAX_CONNECTIONS",
                value,
            })?,
            None => 5,
        };

        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:3000".to_string());

        let jwt_secret = lookup("JWT_SECRET").unwrap_or_else(|| {
            tracing::warn!("JWT_SECRET not set, using development secret");
            DEFAULT_JWT_SECRET.to_string()
        });

        Ok(Config {
            storage,
            database_url,
            database_max_connections,
            bind_addr,
            jwt_secret,
        })
    }
}
