/// Configuration management
///
/// `.env` is loaded first (if present), then each concern is deserialised
/// from flat environment variables with `envy`.
use db_pool::MongoConfig;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment: {0}")]
    Env(#[from] envy::Error),
    #[error("JWT_SECRET must be set and non-empty")]
    MissingJwtSecret,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8083
}

fn default_product_url() -> String {
    "http://localhost:8081".to_string()
}

fn default_payment_url() -> String {
    "http://localhost:8082".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_mongo_uri() -> String {
    "mongodb://localhost:27017".to_string()
}

fn default_mongo_database() -> String {
    "transactions".to_string()
}

fn default_store_timeout_secs() -> u64 {
    5
}

fn default_sweep_interval_secs() -> u64 {
    crate::jobs::SWEEP_INTERVAL.as_secs()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Clone, Deserialize)]
pub struct JwtConfig {
    #[serde(default)]
    pub jwt_secret: String,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig").field("jwt_secret", &"[REDACTED]").finish()
    }
}

/// Services consulted before a transaction is recorded
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_product_url")]
    pub product_url: String,
    #[serde(default = "default_payment_url")]
    pub payment_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl UpstreamConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            product_url: default_product_url(),
            payment_url: default_payment_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct StoreEnv {
    #[serde(default = "default_mongo_uri")]
    mongo_uri: String,
    #[serde(default = "default_mongo_database")]
    mongo_database: String,
    #[serde(default = "default_store_timeout_secs")]
    store_timeout_secs: u64,
    #[serde(default = "default_sweep_interval_secs")]
    sweep_interval_secs: u64,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub upstreams: UpstreamConfig,
    pub mongo: MongoConfig,
    pub store_timeout: Duration,
    pub sweep_interval: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let server: ServerConfig = envy::from_env()?;
        let jwt: JwtConfig = envy::from_env()?;
        if jwt.jwt_secret.is_empty() {
            return Err(ConfigError::MissingJwtSecret);
        }
        let upstreams: UpstreamConfig = envy::from_env()?;
        let store: StoreEnv = envy::from_env()?;

        Ok(Self {
            server,
            jwt,
            upstreams,
            mongo: MongoConfig::new(store.mongo_uri, store.mongo_database),
            store_timeout: Duration::from_secs(store.store_timeout_secs),
            sweep_interval: Duration::from_secs(store.sweep_interval_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear() {
        for key in [
            "PORT",
            "JWT_SECRET",
            "PRODUCT_URL",
            "PAYMENT_URL",
            "REQUEST_TIMEOUT_SECS",
            "MONGO_DATABASE",
            "SWEEP_INTERVAL_SECS",
        ] {
            std::env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear();
        std::env::set_var("JWT_SECRET", "s3cret");

        let config = Config::from_env().unwrap();
        assert_eq!(config.server.port, 8083);
        assert_eq!(config.upstreams.product_url, "http://localhost:8081");
        assert_eq!(config.upstreams.payment_url, "http://localhost:8082");
        assert_eq!(config.upstreams.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.mongo.database, "transactions");
        assert_eq!(config.sweep_interval, Duration::from_secs(300));

        clear();
    }

    #[test]
    #[serial]
    fn test_upstream_overrides() {
        clear();
        std::env::set_var("JWT_SECRET", "s3cret");
        std::env::set_var("PRODUCT_URL", "http://product:8081");
        std::env::set_var("REQUEST_TIMEOUT_SECS", "3");

        let config = Config::from_env().unwrap();
        assert_eq!(config.upstreams.product_url, "http://product:8081");
        assert_eq!(config.upstreams.request_timeout(), Duration::from_secs(3));

        clear();
    }

    #[test]
    #[serial]
    fn test_missing_secret_is_fatal() {
        clear();
        assert!(matches!(Config::from_env(), Err(ConfigError::MissingJwtSecret)));
    }
}
