//! JWT Credential Propagation for gRPC Services
//!
//! The gRPC half of the shared credential check. REST traffic goes through
//! `actix-middleware`; both adapters delegate to
//! [`crypto_core::verify_credential`] so they reject the same inputs.
//!
//! ## Core Components
//!
//! - **JwtServerInterceptor**: validates `authorization` metadata and stores claims
//! - **JwtClientInterceptor**: forwards a caller's credential on outbound calls
//! - **JwtClaimsExt**: request extension trait for reading validated claims
//!
//! ## Usage Example
//!
//! ### Client Side (API Gateway)
//!
//! ```rust,no_run
//! use grpc_jwt_propagation::JwtClientInterceptor;
//!
//! # fn example(incoming: &str) -> Result<(), tonic::Status> {
//! // `incoming` is the Authorization value the gateway received
//! let interceptor = JwtClientInterceptor::from_authorization(incoming)?;
//! // let client = PaymentServiceClient::with_interceptor(channel, interceptor);
//! # Ok(())
//! # }
//! ```
//!
//! ### Server Side (Payment Service)
//!
//! ```rust,no_run
//! use grpc_jwt_propagation::JwtClaimsExt;
//! use tonic::{Request, Response, Status};
//!
//! async fn get_payment(request: Request<()>) -> Result<Response<()>, Status> {
//!     let claims = request.jwt_claims()?;
//!     tracing::debug!(user_id = %claims.user_id, "get_payment");
//!     Ok(Response::new(()))
//! }
//! ```
//!
//! Services whose every method is public (auth's Register/Login) are mounted
//! without the server interceptor instead of being special-cased inside it.

mod client;
mod extensions;
mod server;

pub use client::JwtClientInterceptor;
pub use crypto_core::Claims;
pub use extensions::JwtClaimsExt;
pub use server::JwtServerInterceptor;

/// Metadata key carrying the bearer credential
pub const AUTHORIZATION_KEY: &str = "authorization";
