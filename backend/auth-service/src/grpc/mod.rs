/// gRPC service implementation for Auth Service
///
/// Register and Login are public by nature, so this service is mounted
/// without the JWT interceptor.
use crate::services::AuthApp;
use grpc_clients::proto::auth::{
    auth_service_server::{AuthService, AuthServiceServer},
    LoginRequest, LoginResponse, RegisterRequest, RegisterResponse,
};
use std::net::SocketAddr;
use tokio::sync::broadcast;
use tonic::{transport::Server, Request, Response, Status};
use tracing::info;

pub struct AuthServiceImpl {
    app: AuthApp,
}

impl AuthServiceImpl {
    pub fn new(app: AuthApp) -> Self {
        Self { app }
    }

    pub fn into_server(self) -> AuthServiceServer<Self> {
        AuthServiceServer::new(self)
    }
}

#[tonic::async_trait]
impl AuthService for AuthServiceImpl {
    async fn register(
        &self,
        request: Request<RegisterRequest>,
    ) -> Result<Response<RegisterResponse>, Status> {
        let req = request.into_inner();
        let user = self.app.register(&req.name, &req.email, &req.password).await?;

        Ok(Response::new(RegisterResponse {
            id: user.id.to_string(),
            name: user.name,
            email: user.email,
        }))
    }

    async fn login(&self, request: Request<LoginRequest>) -> Result<Response<LoginResponse>, Status> {
        let req = request.into_inner();
        let token = self.app.login(&req.email, &req.password).await?;

        Ok(Response::new(LoginResponse {
            email: req.email,
            token,
        }))
    }
}

/// Serve `AuthService` until the shutdown channel fires
pub async fn start_grpc_server(
    addr: SocketAddr,
    app: AuthApp,
    mut shutdown: broadcast::Receiver<()>,
) -> Result<(), tonic::transport::Error> {
    info!(%addr, "Auth gRPC server listening");

    Server::builder()
        .add_service(AuthServiceImpl::new(app).into_server())
        .serve_with_shutdown(addr, async move {
            let _ = shutdown.recv().await;
        })
        .await
}
