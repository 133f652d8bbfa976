//! Runtime configuration from environment variables.
//!
//! | Env var                    | Default                    |
//! |----------------------------|----------------------------|
//! | `DATABASE_URL`             | `sqlite://fast_car_api.db` |
//! | `DATABASE_MAX_CONNECTIONS` | `5`                        |
//! | `HOST`                     | `0.0.0.0`                  |
//! | `PORT`                     | `3000`                     |
//! | `BODY_LIMIT_BYTES`         | `65536`                    |

use crate::error::ConfigError;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://fast_car_api.db";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub database_url: String,
    /// Pool size. Ignored for in-memory databases, which always use one connection.
    pub max_connections: u32,
    pub host: IpAddr,
    pub port: u16,
    pub body_limit_bytes: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            database_url: DEFAULT_DATABASE_URL.into(),
            max_connections: 5,
            host: IpAddr::from([0, 0, 0, 0]),
            port: 3000,
            body_limit_bytes: 64 * 1024,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; missing keys take the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = AppConfig::default();
        Ok(AppConfig {
            database_url: lookup("DATABASE_URL")
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(defaults.database_url),
            max_connections: parsed(&lookup, "DATABASE_MAX_CONNECTIONS")?
                .unwrap_or(defaults.max_connections),
            host: parsed(&lookup, "HOST")?.unwrap_or(defaults.host),
            port: parsed(&lookup, "PORT")?.unwrap_or(defaults.port),
            body_limit_bytes: parsed(&lookup, "BODY_LIMIT_BYTES")?
                .unwrap_or(defaults.body_limit_bytes),
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn is_in_memory(&self) -> bool {
        self.database_url.contains(":memory:") || self.database_url.contains("mode=memory")
    }
}

fn parsed<T, F>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
    }
}
