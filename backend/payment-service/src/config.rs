/// Configuration management
///
/// `.env` is loaded first (if present); each concern then reads its own
/// flat environment variables through `envy`.
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

fn default_http_port() -> u16 {
    8082
}

fn default_grpc_port() -> u16 {
    50051
}

fn default_mongo_uri() -> String {
    "mongodb://localhost:27017".to_string()
}

fn default_mongo_database() -> String {
    "payments".to_string()
}

fn default_store_timeout_secs() -> u64 {
    5
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_http_port", rename = "port")]
    pub http_port: u16,
    #[serde(default = "default_grpc_port")]
    pub grpc_port: u16,
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

#[derive(Debug, Clone, Deserialize)]
struct StoreEnv {
    #[serde(default = "default_mongo_uri")]
    mongo_uri: String,
    #[serde(default = "default_mongo_database")]
    mongo_database: String,
    #[serde(default = "default_store_timeout_secs")]
    store_timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub mongo: MongoConfig,
    pub store_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let server: ServerConfig = envy::from_env()?;
        let jwt: JwtConfig = envy::from_env()?;
        if jwt.jwt_secret.is_empty() {
            return Err(ConfigError::MissingJwtSecret);
        }

        let store: StoreEnv = envy::from_env()?;

        Ok(Self {
            server,
            jwt,
            mongo: MongoConfig::new(store.mongo_uri, store.mongo_database),
            store_timeout_secs: store.store_timeout_secs,
        })
    }
}
