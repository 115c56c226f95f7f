//! Storefront API Gateway
//!
//! Terminates all external HTTP traffic. Every request except the exempt
//! ones passes the JWT middleware once, then is dispatched by the static
//! route table either to a REST backend verbatim or to a gRPC backend
//! through JSON translation.

pub mod config;
pub mod dispatch;
pub mod proxy;
pub mod routes;
pub mod rpc;

pub use config::Config;
pub use dispatch::{configure, Gateway, GatewayInitError, GATEWAY_EXEMPT_PATHS, MAX_BODY_BYTES};
pub use routes::{AuthOp, PaymentOp, Policy, RouteMatch, RouteTable};
