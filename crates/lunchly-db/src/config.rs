//! # Database Configuration
//!
//! Pool settings for the SQLite database, built in code or loaded from
//! environment variables with fallback to defaults.
//!
//! ## Environment Variables
//! | Variable                           | Default        |
//! |------------------------------------|----------------|
//! | `LUNCHLY_DB_PATH`                  | `./lunchly.db` |
//! | `LUNCHLY_DB_MAX_CONNECTIONS`       | `5`            |
//! | `LUNCHLY_DB_CONNECT_TIMEOUT_SECS`  | `30`           |
//! | `LUNCHLY_DB_RUN_MIGRATIONS`        | `true`         |

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Default database file, relative to the working directory.
pub const DEFAULT_DB_PATH: &str = "./lunchly.db";

/// Database configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = DbConfig::new("/path/to/lunchly.db")
///     .max_connections(5)
///     .min_connections(1);
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Path to the SQLite database file.
    pub database_path: PathBuf,

    /// Maximum number of connections in the pool.
    /// Default: 5
    pub max_connections: u32,

    /// Minimum number of connections to keep alive.
    /// Default: 1
    pub min_connections: u32,

    /// Connection timeout duration.
    /// Default: 30 seconds
    pub connect_timeout: Duration,

    /// Idle timeout before closing a connection.
    /// Default: 10 minutes
    pub idle_timeout: Duration,

    /// Whether to apply the embedded schema on connect.
    /// Default: true
    pub run_migrations: bool,
}

impl DbConfig {
    /// Creates a new database configuration with the given path.
    ///
    /// ## Arguments
    /// * `path` - Path to the SQLite database file. Will be created if it doesn't exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            run_migrations: true,
        }
    }

    /// Sets the maximum number of connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the minimum number of connections.
    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    /// Sets the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets whether to run migrations on connect.
    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    /// Creates an in-memory database configuration (for testing).
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let db = Database::new(DbConfig::in_memory()).await?;
    /// // Database is isolated, perfect for tests
    /// ```
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: PathBuf::from(":memory:"),
            max_connections: 1, // In-memory requires single connection
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(60),
            run_migrations: true,
        }
    }

    /// Loads configuration from `LUNCHLY_DB_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary variable lookup.
    ///
    /// `from_env` uses the process environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = lookup("LUNCHLY_DB_PATH").unwrap_or_else(|| DEFAULT_DB_PATH.to_string());
        let mut config = DbConfig::new(path);

        if let Some(value) = lookup("LUNCHLY_DB_MAX_CONNECTIONS") {
            config.max_connections = parse_var("LUNCHLY_DB_MAX_CONNECTIONS", &value)?;
        }

        if let Some(value) = lookup("LUNCHLY_DB_CONNECT_TIMEOUT_SECS") {
            let secs: u64 = parse_var("LUNCHLY_DB_CONNECT_TIMEOUT_SECS", &value)?;
            config.connect_timeout = Duration::from_secs(secs);
        }

        if let Some(value) = lookup("LUNCHLY_DB_RUN_MIGRATIONS") {
            config.run_migrations = parse_var("LUNCHLY_DB_RUN_MIGRATIONS", &value)?;
        }

        if config.max_connections == 0 {
            return Err(ConfigError::InvalidValue(
                "LUNCHLY_DB_MAX_CONNECTIONS".to_string(),
            ));
        }

        Ok(config)
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue(key.to_string()))
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_config_builder() {
        let config = DbConfig::new("/tmp/test.db")
            .max_connections(10)
            .min_connections(2)
            .run_migrations(false);

        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 2);
        assert!(!config.run_migrations);
    }

    #[test]
    fn test_defaults_without_env() {
        let config = DbConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.database_path, PathBuf::from(DEFAULT_DB_PATH));
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.connect_timeout, Duration::from_secs(30));
        assert!(config.run_migrations);
    }

    #[test]
    fn test_env_overrides() {
        let config = DbConfig::from_lookup(lookup(&[
            ("LUNCHLY_DB_PATH", "/var/lib/lunchly/app.db"),
            ("LUNCHLY_DB_MAX_CONNECTIONS", "8"),
            ("LUNCHLY_DB_CONNECT_TIMEOUT_SECS", "3"),
            ("LUNCHLY_DB_RUN_MIGRATIONS", "false"),
        ]))
        .unwrap();

        assert_eq!(config.database_path, PathBuf::from("/var/lib/lunchly/app.db"));
        assert_eq!(config.max_connections, 8);
        assert_eq!(config.connect_timeout, Duration::from_secs(3));
        assert!(!config.run_migrations);
    }

    #[test]
    fn test_invalid_env_value() {
        let err = DbConfig::from_lookup(lookup(&[("LUNCHLY_DB_MAX_CONNECTIONS", "many")]))
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for LUNCHLY_DB_MAX_CONNECTIONS");

        assert!(DbConfig::from_lookup(lookup(&[("LUNCHLY_DB_MAX_CONNECTIONS", "0")])).is_err());
    }
}
