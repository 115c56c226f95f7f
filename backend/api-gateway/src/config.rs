//! Configuration for the API Gateway
//!
//! Loads settings from:
//! 1. `.env` file (local development)
//! 2. Environment variables
//!
//! Built once in `main` and handed to every component; request handling never
//! reads the environment.

use grpc_clients::GrpcConfig;
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
    8084
}

fn default_product_url() -> String {
    "http://localhost:8081".to_string()
}

fn default_payment_url() -> String {
    "http://localhost:8082".to_string()
}

fn default_transaction_url() -> String {
    "http://localhost:8083".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
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

/// REST backends reached by passthrough
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_product_url")]
    pub product_url: String,
    #[serde(default = "default_payment_url")]
    pub payment_url: String,
    #[serde(default = "default_transaction_url")]
    pub transaction_url: String,
    /// Bound on a whole forwarded exchange
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
            transaction_url: default_transaction_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub upstreams: UpstreamConfig,
    pub grpc: GrpcConfig,
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
            upstreams: envy::from_env()?,
            grpc: GrpcConfig::from_env()?,
        })
    }
}
