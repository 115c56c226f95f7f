//! Integration Tests for JWT Propagation
//!
//! Client -> credential injection -> Server -> validation -> Handler access

use chrono::Utc;
use crypto_core::{Claims, JwtManager};
use grpc_jwt_propagation::{JwtClaimsExt, JwtClientInterceptor, JwtServerInterceptor};
use jsonwebtoken::{encode, EncodingKey, Header};
use std::sync::Arc;
use tonic::service::Interceptor;
use tonic::{Request, Status};

const TEST_SECRET: &str = "propagation-test-secret";

fn manager() -> Arc<JwtManager> {
    Arc::new(JwtManager::new(TEST_SECRET).expect("Failed to build manager"))
}

/// Simulate a gRPC request flowing through client and server interceptors
fn simulate_grpc_flow(manager: Arc<JwtManager>, authorization: &str) -> Result<Request<()>, Status> {
    let mut client_interceptor = JwtClientInterceptor::from_authorization(authorization)?;
    let request = client_interceptor.call(Request::new(()))?;

    let mut server_interceptor = JwtServerInterceptor::new(manager);
    server_interceptor.call(request)
}

#[test]
fn test_end_to_end_jwt_flow() {
    let manager = manager();
    let token = manager.issue("user-1", "test@example.com").unwrap();

    let request = simulate_grpc_flow(manager, &format!("Bearer {}", token)).expect("Flow should succeed");

    let claims = request.jwt_claims().expect("Claims should be present");
    assert_eq!(claims.user_id, "user-1");
    assert_eq!(claims.email, "test@example.com");
}

#[test]
fn test_end_to_end_bare_token() {
    let manager = manager();
    let token = manager.issue("user-2", "bare@example.com").unwrap();

    let request = simulate_grpc_flow(manager, &token).expect("Bare token should be accepted");
    assert_eq!(request.jwt_claims().unwrap().user_id, "user-2");
}

#[test]
fn test_end_to_end_invalid_token() {
    let status = simulate_grpc_flow(manager(), "Bearer invalid.jwt.token").unwrap_err();
    assert_eq!(status.code(), tonic::Code::Unauthenticated);
}

#[test]
fn test_end_to_end_expired_token() {
    let expired = encode(
        &Header::default(),
        &Claims {
            user_id: "user-3".to_string(),
            email: "old@example.com".to_string(),
            exp: Utc::now().timestamp() - 60,
        },
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap();

    let status = simulate_grpc_flow(manager(), &format!("Bearer {}", expired)).unwrap_err();
    assert_eq!(status.code(), tonic::Code::Unauthenticated);
}

#[test]
fn test_end_to_end_foreign_secret() {
    let foreign = JwtManager::new("someone-else").unwrap();
    let token = foreign.issue("user-4", "x@example.com").unwrap();

    let status = simulate_grpc_flow(manager(), &format!("Bearer {}", token)).unwrap_err();
    assert_eq!(status.code(), tonic::Code::Unauthenticated);
}
