//! Request dispatch
//!
//! Every non-health request lands on one catch-all handler which resolves the
//! route table and hands off to the REST forwarder or the RPC translator.

use crate::config::UpstreamConfig;
use crate::proxy::RestForwarder;
use crate::routes::{Policy, RouteTable};
use crate::rpc;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{web, HttpRequest, HttpResponse};
use error_types::ServiceError;
use grpc_clients::{GrpcClientError, GrpcConfig, ServiceClients};
use thiserror::Error;

/// Paths the JWT middleware lets through, with and without `/api`
pub const GATEWAY_EXEMPT_PATHS: &[&str] = &[
    "/register",
    "/login",
    "/health",
    "/api/register",
    "/api/login",
];

/// Largest request body the gateway buffers before dispatch; larger bodies
/// are answered with `413` and never reach a backend
pub const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum GatewayInitError {
    #[error("Failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Grpc(#[from] GrpcClientError),
}

/// Everything a request needs, built once and shared by all workers
#[derive(Debug, Clone)]
pub struct Gateway {
    routes: RouteTable,
    forwarder: RestForwarder,
    clients: ServiceClients,
}

impl Gateway {
    /// gRPC channels connect lazily, so this succeeds with backends down
    pub fn new(upstreams: &UpstreamConfig, grpc: &GrpcConfig) -> Result<Self, GatewayInitError> {
        Ok(Self {
            routes: RouteTable::new(upstreams),
            forwarder: RestForwarder::new(upstreams.request_timeout())?,
            clients: ServiceClients::new(grpc)?,
        })
    }
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({"status": "ok"}))
}

async fn dispatch(
    req: HttpRequest,
    body: web::Bytes,
    gateway: web::Data<Gateway>,
) -> Result<HttpResponse, ServiceError> {
    let Some(route) = gateway.routes.resolve(req.method(), req.path()) else {
        tracing::debug!(method = %req.method(), path = %req.path(), "No route matched");
        return Err(ServiceError::NotFound("route not found".to_string()));
    };

    match route.policy {
        Policy::RestForward { base_url } => {
            gateway
                .forwarder
                .forward(&req, body, base_url, &route.path)
                .await
        }
        Policy::PaymentRpc(op) => {
            let authorization = req
                .headers()
                .get(AUTHORIZATION)
                .and_then(|value| value.to_str().ok());
            rpc::translate_payment(&gateway.clients, *op, route.id.as_deref(), authorization, &body)
                .await
        }
        Policy::AuthRpc(op) => rpc::translate_auth(&gateway.clients, *op, &body).await,
    }
}

/// Mount the gateway; the caller wraps the `App` with `JwtAuthMiddleware`
/// using [`GATEWAY_EXEMPT_PATHS`] and registers `web::Data<Gateway>`
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::PayloadConfig::new(MAX_BODY_BYTES))
        .route("/health", web::get().to(health))
        .service(web::resource("/{tail:.*}").to(dispatch));
}
