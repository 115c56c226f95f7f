use db_pool::MongoConfig;
use serde::Deserialize;
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
    8081
}

fn default_mongo_uri() -> String {
    "mongodb://localhost:27017".to_string()
}

fn default_mongo_database() -> String {
    "products".to_string()
}

fn default_store_timeout_secs() -> u64 {
    5
}

#[derive(Clone, Deserialize)]
struct Env {
    #[serde(default = "default_host")]
    host: String,
    #[serde(default = "default_port")]
    port: u16,
    #[serde(default)]
    jwt_secret: String,
    #[serde(default = "default_mongo_uri")]
    mongo_uri: String,
    #[serde(default = "default_mongo_database")]
    mongo_database: String,
    #[serde(default = "default_store_timeout_secs")]
    store_timeout_secs: u64,
}

#[derive(Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub mongo: MongoConfig,
    pub store_timeout_secs: u64,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("jwt_secret", &"[REDACTED]")
            .field("mongo", &self.mongo)
            .field("store_timeout_secs", &self.store_timeout_secs)
            .finish()
    }
}

impl Config {
    /// Load `.env` if present, then read the flat environment
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let env: Env = envy::from_env()?;
        if env.jwt_secret.is_empty() {
            return Err(ConfigError::MissingJwtSecret);
        }

        Ok(Self {
            host: env.host,
            port: env.port,
            jwt_secret: env.jwt_secret,
            mongo: MongoConfig::new(env.mongo_uri, env.mongo_database),
            store_timeout_secs: env.store_timeout_secs,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
