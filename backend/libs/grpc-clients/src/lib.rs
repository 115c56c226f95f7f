/// gRPC Clients Library
///
/// Centralizes code generation for the Storefront protos and provides the
/// channel setup used by every caller.
///
/// This library:
/// - Generates client and server stubs for `AuthService` and `PaymentService`
/// - Derives serde on every message so the gateway can map JSON bodies directly
/// - Builds lazily-connected channels with connect and request timeouts
pub mod config;

pub use config::GrpcConfig;

use grpc_jwt_propagation::JwtClientInterceptor;
use std::time::Duration;
use thiserror::Error;
use tonic::service::interceptor::InterceptedService;
use tonic::transport::{Channel, Endpoint};
use tonic::Status;

// Re-export generated proto modules
pub mod proto {
    pub mod auth {
        tonic::include_proto!("storefront.auth.v1");
    }

    pub mod payment {
        tonic::include_proto!("storefront.payment.v1");
    }
}

use proto::auth::auth_service_client::AuthServiceClient;
use proto::payment::payment_service_client::PaymentServiceClient;

/// Payment client that re-attaches the caller's credential to every call
pub type AuthorizedPaymentClient = PaymentServiceClient<InterceptedService<Channel, JwtClientInterceptor>>;

#[derive(Debug, Error)]
pub enum GrpcClientError {
    #[error("Invalid gRPC endpoint {url}: {source}")]
    InvalidEndpoint {
        url: String,
        #[source]
        source: tonic::transport::Error,
    },
}

/// Service client manager with lazily connected gRPC channels
///
/// Each `Channel` multiplexes over one HTTP/2 connection; clients built from
/// it are cheap clones. Connection happens on first use, so services can start
/// in any order.
#[derive(Clone, Debug)]
pub struct ServiceClients {
    auth_channel: Channel,
    payment_channel: Channel,
}

impl ServiceClients {
    pub fn new(config: &GrpcConfig) -> Result<Self, GrpcClientError> {
        Ok(Self {
            auth_channel: create_channel(&config.auth_grpc_url, config)?,
            payment_channel: create_channel(&config.payment_grpc_url, config)?,
        })
    }

    pub fn auth_client(&self) -> AuthServiceClient<Channel> {
        AuthServiceClient::new(self.auth_channel.clone())
    }

    /// Payment client carrying `authorization` as received from the caller
    pub fn payment_client(&self, authorization: &str) -> Result<AuthorizedPaymentClient, Status> {
        let interceptor = JwtClientInterceptor::from_authorization(authorization)?;
        Ok(PaymentServiceClient::with_interceptor(
            self.payment_channel.clone(),
            interceptor,
        ))
    }
}

/// Create a configured gRPC channel
///
/// - **connect_lazy()**: delays connection until first RPC
/// - **connect_timeout**: bounds TCP/HTTP2 setup
/// - **timeout**: bounds every call; an elapsed call fails with `Cancelled`
fn create_channel(url: &str, config: &GrpcConfig) -> Result<Channel, GrpcClientError> {
    let endpoint = Endpoint::from_shared(url.to_string()).map_err(|source| {
        GrpcClientError::InvalidEndpoint {
            url: url.to_string(),
            source,
        }
    })?;

    tracing::debug!(url, "Configuring lazy gRPC channel");

    Ok(endpoint
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .http2_keep_alive_interval(Duration::from_secs(60))
        .keep_alive_timeout(Duration::from_secs(20))
        .keep_alive_while_idle(true)
        .connect_lazy())
}
