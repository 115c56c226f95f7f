/// gRPC Configuration
///
/// Endpoints and timeouts for outbound gRPC calls, read from the
/// environment (`PAYMENT_GRPC_URL`, `AUTH_GRPC_URL`, `GRPC_*_SECS`).
use serde::Deserialize;

fn default_payment_grpc_url() -> String {
    "http://localhost:50051".to_string()
}

fn default_auth_grpc_url() -> String {
    "http://localhost:50052".to_string()
}

fn default_connect_timeout_secs() -> u64 {
    5
}

fn default_request_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GrpcConfig {
    /// Payment Service endpoint
    #[serde(default = "default_payment_grpc_url")]
    pub payment_grpc_url: String,

    /// Auth Service endpoint
    #[serde(default = "default_auth_grpc_url")]
    pub auth_grpc_url: String,

    /// gRPC connection timeout in seconds
    #[serde(default = "default_connect_timeout_secs", rename = "grpc_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// gRPC request timeout in seconds
    #[serde(default = "default_request_timeout_secs", rename = "grpc_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for GrpcConfig {
    fn default() -> Self {
        Self {
            payment_grpc_url: default_payment_grpc_url(),
            auth_grpc_url: default_auth_grpc_url(),
            connect_timeout_secs: default_connect_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl GrpcConfig {
    /// Load configuration from environment variables
    /// Falls back to defaults for development
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[serial_test::serial]
    fn test_from_env_defaults() {
        std::env::remove_var("PAYMENT_GRPC_URL");
        std::env::remove_var("AUTH_GRPC_URL");
        std::env::remove_var("GRPC_CONNECT_TIMEOUT_SECS");
        std::env::remove_var("GRPC_REQUEST_TIMEOUT_SECS");

        assert_eq!(GrpcConfig::from_env().unwrap(), GrpcConfig::default());
    }

    #[test]
    #[serial_test::serial]
    fn test_from_env_overrides() {
        std::env::set_var("PAYMENT_GRPC_URL", "http://payments:6000");
        std::env::set_var("GRPC_REQUEST_TIMEOUT_SECS", "3");

        let config = GrpcConfig::from_env().unwrap();
        assert_eq!(config.payment_grpc_url, "http://payments:6000");
        assert_eq!(config.request_timeout_secs, 3);
        assert_eq!(config.auth_grpc_url, "http://localhost:50052");

        std::env::remove_var("PAYMENT_GRPC_URL");
        std::env::remove_var("GRPC_REQUEST_TIMEOUT_SECS");
    }
}
