/// Configuration management
///
/// `.env` is loaded first (if present), then each concern is deserialised
/// from flat environment variables with `envy`.
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
    8085
}

fn default_grpc_port() -> u16 {
    50052
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

#[derive(Clone, Deserialize)]
pub struct DatabaseConfig {
    pub database_url: String,
    #[serde(default = "default_store_timeout_secs")]
    pub store_timeout_secs: u64,
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("database_url", &"[REDACTED]")
            .field("store_timeout_secs", &self.store_timeout_secs)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub database: DatabaseConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let jwt: JwtConfig = envy::from_env()?;
        if jwt.jwt_secret.is_empty() {
            return Err(ConfigError::MissingJwtSecret);
        }

        Ok(Self {
            server: envy::from_env()?,
            jwt,
            database: envy::from_env()?,
        })
    }
}
