use std::env;

use thiserror::Error;
use url::Url;

pub const DEFAULT_DB_NAME: &str = "test";
pub const DEFAULT_BACKEND_URI: &str = "http://localhost:8080";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Which document store backs the server.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreKind {
    Mongo { uri: String, db_name: String },
    Memory,
}

/// Server configuration read from the process environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub port: u16,
    pub store: StoreKind,
}

impl Config {
    /// Loads `.env` when present, then reads the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = lookup("PORT").ok_or(ConfigError::Missing("PORT"))?;
        let port = port.trim().parse::<u16>().map_err(|e| ConfigError::Invalid {
            name: "PORT",
            reason: e.to_string(),
        })?;

        let store = match lookup("APPOINTMENTS_STORE").as_deref() {
            None | Some("mongo") => StoreKind::Mongo {
                uri: lookup("MONGO_URI").ok_or(ConfigError::Missing("MONGO_URI"))?,
                db_name: lookup("MONGO_DB").unwrap_or_else(|| DEFAULT_DB_NAME.to_string()),
            },
            Some("memory") => StoreKind::Memory,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: "APPOINTMENTS_STORE",
                    reason: format!("unknown store `{}`", other),
                });
            }
        };

        Ok(Self {
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            store,
        })
    }
}

/// Client-side configuration: where the backend lives.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub backend_uri: Url,
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw = lookup("BACKEND_URI").unwrap_or_else(|| DEFAULT_BACKEND_URI.to_string());
        let backend_uri = Url::parse(&raw).map_err(|e| ConfigError::Invalid {
            name: "BACKEND_URI",
            reason: e.to_string(),
        })?;
        Ok(Self { backend_uri })
    }
}
