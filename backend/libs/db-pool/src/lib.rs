//! Database connection pool management
//!
//! Provides unified pool creation for all services: PostgreSQL (sqlx) for
//! auth-service and MongoDB for the catalogue, payment and transaction stores.

pub mod mongo;

pub use mongo::{connect_mongo, parse_object_id, MongoConfig};

use serde::Deserialize;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::fmt;
use std::time::Duration;
use tracing::{debug, error, info};

/// Database connection pool configuration
#[derive(Clone)]
pub struct DbConfig {
    /// Service name for log labeling
    pub service_name: String,
    /// PostgreSQL connection URL
    pub database_url: String,
    /// Maximum number of connections
    pub max_connections: u32,
    /// Minimum number of connections
    pub min_connections: u32,
    /// Connection creation timeout (new connection to PostgreSQL)
    pub connect_timeout_secs: u64,
    /// Connection acquisition timeout (get connection from pool)
    pub acquire_timeout_secs: u64,
    /// Connection idle timeout
    pub idle_timeout_secs: u64,
    /// Connection maximum lifetime
    pub max_lifetime_secs: u64,
}

impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("service_name", &self.service_name)
            .field("database_url", &"[REDACTED]")
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("acquire_timeout_secs", &self.acquire_timeout_secs)
            .field("idle_timeout_secs", &self.idle_timeout_secs)
            .field("max_lifetime_secs", &self.max_lifetime_secs)
            .finish()
    }
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            service_name: String::from("unknown"),
            database_url: String::new(),
            max_connections: 10,
            min_connections: 2,
            connect_timeout_secs: 5,
            acquire_timeout_secs: 10,
            idle_timeout_secs: 600,
            max_lifetime_secs: 1800,
        }
    }
}

/// Pool tuning knobs read from `DB_*` variables
#[derive(Debug, Default, Deserialize)]
struct PoolTuning {
    max_connections: Option<u32>,
    min_connections: Option<u32>,
    connect_timeout_secs: Option<u64>,
    acquire_timeout_secs: Option<u64>,
    idle_timeout_secs: Option<u64>,
    max_lifetime_secs: Option<u64>,
}

impl DbConfig {
    pub fn new(service_name: &str, database_url: impl Into<String>) -> Self {
        Self {
            service_name: service_name.to_string(),
            database_url: database_url.into(),
            ..Self::default()
        }
    }

    /// Apply `DB_MAX_CONNECTIONS`, `DB_ACQUIRE_TIMEOUT_SECS`, ... overrides
    ///
    /// Malformed values fail loudly instead of silently keeping the default.
    pub fn with_env_overrides(mut self) -> Result<Self, envy::Error> {
        let tuning: PoolTuning = envy::prefixed("DB_").from_env()?;
        let defaults = self.clone();

        self.max_connections = tuning.max_connections.unwrap_or(defaults.max_connections);
        self.min_connections = tuning.min_connections.unwrap_or(defaults.min_connections);
        self.connect_timeout_secs = tuning
            .connect_timeout_secs
            .unwrap_or(defaults.connect_timeout_secs);
        self.acquire_timeout_secs = tuning
            .acquire_timeout_secs
            .unwrap_or(defaults.acquire_timeout_secs);
        self.idle_timeout_secs = tuning.idle_timeout_secs.unwrap_or(defaults.idle_timeout_secs);
        self.max_lifetime_secs = tuning.max_lifetime_secs.unwrap_or(defaults.max_lifetime_secs);
        Ok(self)
    }

    /// Log pool configuration details
    pub fn log_config(&self) {
        info!(
            "Database Pool Configuration: \
             max_connections={}, min_connections={}, \
             connect_timeout={}s, acquire_timeout={}s, idle_timeout={}s, max_lifetime={}s",
            self.max_connections,
            self.min_connections,
            self.connect_timeout_secs,
            self.acquire_timeout_secs,
            self.idle_timeout_secs,
            self.max_lifetime_secs
        );
    }
}

/// Create a PostgreSQL connection pool and verify it answers
pub async fn create_pool(config: DbConfig) -> Result<PgPool, sqlx::Error> {
    debug!(
        "Creating database pool: service={}, max={}, min={}, \
         acquire_timeout={}s, verify_timeout={}s, idle_timeout={}s",
        config.service_name,
        config.max_connections,
        config.min_connections,
        config.acquire_timeout_secs,
        config.connect_timeout_secs,
        config.idle_timeout_secs
    );

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        // Timeout for acquiring a connection from the pool
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        // Close connections idle for longer than this
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        // Maximum lifetime of a connection (to handle stale connections)
        .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
        // Test connections before returning them from the pool
        .test_before_acquire(true)
        .connect(&config.database_url)
        .await?;

    // Verify connection with connect timeout
    match tokio::time::timeout(
        Duration::from_secs(config.connect_timeout_secs),
        sqlx::query("SELECT 1").execute(&pool),
    )
    .await
    {
        Ok(Ok(_)) => {
            info!(
                service = %config.service_name,
                "Database pool created and verified successfully"
            );
            Ok(pool)
        }
        Ok(Err(e)) => {
            error!(
                service = %config.service_name,
                error = %e,
                "Database connection verification failed"
            );
            Err(e)
        }
        Err(_) => {
            error!(
                service = %config.service_name,
                timeout_secs = config.connect_timeout_secs,
                "Database connection verification timeout"
            );
            Err(sqlx::Error::Io(std::io::Error::new(
                std::io::ErrorKind::TimedOut,
                "Database verification timeout",
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clear_overrides() {
        for key in [
            "DB_MAX_CONNECTIONS",
            "DB_MIN_CONNECTIONS",
            "DB_CONNECT_TIMEOUT_SECS",
            "DB_ACQUIRE_TIMEOUT_SECS",
            "DB_IDLE_TIMEOUT_SECS",
            "DB_MAX_LIFETIME_SECS",
        ] {
            std::env::remove_var(key);
        }
    }

    #[test]
    #[serial_test::serial]
    fn test_defaults_without_overrides() {
        clear_overrides();

        let config = DbConfig::new("auth-service", "postgres://localhost/test")
            .with_env_overrides()
            .unwrap();

        assert_eq!(config.service_name, "auth-service");
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 2);
        assert_eq!(config.connect_timeout_secs, 5);
        assert_eq!(config.acquire_timeout_secs, 10);
    }

    #[test]
    #[serial_test::serial]
    fn test_env_override() {
        clear_overrides();
        std::env::set_var("DB_MAX_CONNECTIONS", "40");

        let config = DbConfig::new("auth-service", "postgres://localhost/test")
            .with_env_overrides()
            .unwrap();
        assert_eq!(config.max_connections, 40);
        assert_eq!(config.min_connections, 2);

        clear_overrides();
    }

    #[test]
    #[serial_test::serial]
    fn test_malformed_override_is_an_error() {
        clear_overrides();
        std::env::set_var("DB_MAX_CONNECTIONS", "lots");

        let result = DbConfig::new("auth-service", "postgres://localhost/test").with_env_overrides();
        assert!(result.is_err());

        clear_overrides();
    }

    #[test]
    fn test_debug_redacts_url() {
        let config = DbConfig::new("auth-service", "postgres://user:hunter2@db/auth");
        assert!(!format!("{:?}", config).contains("hunter2"));
    }
}
