#![allow(dead_code)]

use api_gateway::config::UpstreamConfig;
use api_gateway::Gateway;
use crypto_core::JwtManager;
use grpc_clients::GrpcConfig;
use std::sync::Arc;

pub const SECRET: &str = "api-gateway-test-secret";

/// Nothing listens here; calls fail with connection refused
pub const DEAD_URL: &str = "http://127.0.0.1:1";

pub fn jwt() -> Arc<JwtManager> {
    Arc::new(JwtManager::new(SECRET).unwrap())
}

pub fn bearer() -> String {
    format!("Bearer {}", jwt().issue("user-1", "buyer@example.com").unwrap())
}

pub fn upstreams(product_url: &str, payment_url: &str, transaction_url: &str) -> UpstreamConfig {
    UpstreamConfig {
        product_url: product_url.to_string(),
        payment_url: payment_url.to_string(),
        transaction_url: transaction_url.to_string(),
        request_timeout_secs: 2,
    }
}

pub fn grpc(payment_grpc_url: &str, auth_grpc_url: &str) -> GrpcConfig {
    GrpcConfig {
        payment_grpc_url: payment_grpc_url.to_string(),
        auth_grpc_url: auth_grpc_url.to_string(),
        connect_timeout_secs: 1,
        request_timeout_secs: 2,
    }
}

pub fn gateway(upstreams: UpstreamConfig, grpc: GrpcConfig) -> Gateway {
    Gateway::new(&upstreams, &grpc).unwrap()
}

pub fn offline_gateway() -> Gateway {
    gateway(upstreams(DEAD_URL, DEAD_URL, DEAD_URL), grpc(DEAD_URL, DEAD_URL))
}
