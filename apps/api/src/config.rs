// Service configuration
// Read once at startup from the environment (after loading `.env`)

use thiserror::Error;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://iot.db";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be a positive integer, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },
}

/// Store connection settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// SQLite connection URL, e.g. `sqlite://iot.db`
    pub database_url: String,
    /// Upper bound on pooled connections
    pub max_connections: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl Config {
    /// Reads `DATABASE_URL` and `DATABASE_MAX_CONNECTIONS` from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup, falling back to defaults
    ///
    /// # Example
    /// ```
    /// use iot_registry_api::config::Config;
    ///
    /// let config = Config::from_lookup(|key| match key {
    ///     "DATABASE_URL" => Some("sqlite://test.db".to_string()),
    ///     _ => None,
    /// })
    /// .expect("valid config");
    ///
    /// assert_eq!(config.database_url, "sqlite://test.db");
    /// assert_eq!(config.max_connections, 5);
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| {
            tracing::warn!("DATABASE_URL not set, using default");
            DEFAULT_DATABASE_URL.to_string()
        });

        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            None => DEFAULT_MAX_CONNECTIONS,
            Some(value) => match value.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::InvalidNumber {
                        key: "DATABASE_MAX_CONNECTIONS",
                        value,
                    })
                }
            },
        };

        Ok(Self {
            database_url,
            max_connections,
        })
    }
}
