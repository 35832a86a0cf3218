//! Server configuration read from environment variables.
//!
//! - `RECIPE_STORE`: `postgres` (default) or `memory`
//! - `DATABASE_URL`: required when the store is `postgres`
//! - `DATABASE_POOL_SIZE`: maximum pooled connections (default 10)
//! - `BIND_ADDR`: listen address (default `0.0.0.0:3000`)
//!
//! Telemetry variables are read by [`crate::telemetry::init`].

use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use thiserror::Error;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_POOL_SIZE: &str = "10";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres { database_url: String, pool_size: u32 },
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub store: StoreBackend,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_addr = parse_or("BIND_ADDR", lookup("BIND_ADDR"), DEFAULT_BIND_ADDR)?;

        let store = match lookup("RECIPE_STORE").as_deref() {
            None | Some("postgres") => StoreBackend::Postgres {
                database_url: lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?,
                pool_size: parse_or(
                    "DATABASE_POOL_SIZE",
                    lookup("DATABASE_POOL_SIZE"),
                    DEFAULT_POOL_SIZE,
                )?,
            },
            Some("memory") => StoreBackend::Memory,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: "RECIPE_STORE",
                    value: other.to_string(),
                })
            }
        };

        if let StoreBackend::Postgres { pool_size: 0, .. } = store {
            return Err(ConfigError::Invalid {
                key: "DATABASE_POOL_SIZE",
                value: "0".to_string(),
            });
        }

        Ok(Config { bind_addr, store })
    }
}

/// Parse `raw`, falling back to `default` when the variable is unset.
fn parse_or<T: FromStr>(
    key: &'static str,
    raw: Option<String>,
    default: &str,
) -> Result<T, ConfigError> {
    let value = raw.unwrap_or_else(|| default.to_string());
    value.parse().map_err(|_| ConfigError::Invalid { key, value })
}
