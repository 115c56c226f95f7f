/// gRPC service implementation for Payment Service
///
/// Every method sits behind `JwtServerInterceptor`; by the time a handler
/// runs, the verified claims are in the request extensions.
use crate::services::PaymentApp;
use crypto_core::JwtManager;
use grpc_clients::proto::payment::{
    payment_service_server::{PaymentService, PaymentServiceServer},
    CreatePaymentRequest, Empty, GetByIdRequest, Payment, PaymentList, UpdatePaymentRequest,
};
use grpc_jwt_propagation::{JwtClaimsExt, JwtServerInterceptor};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::broadcast;
use tonic::service::interceptor::InterceptedService;
use tonic::transport::Server;
use tonic::{Request, Response, Status};
use tracing::{debug, info};

pub struct PaymentServiceImpl {
    app: PaymentApp,
}

impl PaymentServiceImpl {
    pub fn new(app: PaymentApp) -> Self {
        Self { app }
    }

    /// Wrap in the generated server with token verification in front
    pub fn into_server(
        self,
        jwt: Arc<JwtManager>,
    ) -> InterceptedService<PaymentServiceServer<Self>, JwtServerInterceptor> {
        PaymentServiceServer::with_interceptor(self, JwtServerInterceptor::new(jwt))
    }
}

#[tonic::async_trait]
impl PaymentService for PaymentServiceImpl {
    async fn create_payment(
        &self,
        request: Request<CreatePaymentRequest>,
    ) -> Result<Response<Payment>, Status> {
        let user_id = request.jwt_claims()?.user_id.clone();
        let req = request.into_inner();

        let payment = self.app.create(&req.email, req.amount).await?;
        debug!(%user_id, payment_id = %payment.id, "Payment recorded over gRPC");

        Ok(Response::new(payment.into()))
    }

    async fn get_all_payments(
        &self,
        _request: Request<Empty>,
    ) -> Result<Response<PaymentList>, Status> {
        let payments = self.app.list().await?;

        Ok(Response::new(PaymentList {
            payments: payments.into_iter().map(Payment::from).collect(),
        }))
    }

    async fn get_payment_by_id(
        &self,
        request: Request<GetByIdRequest>,
    ) -> Result<Response<Payment>, Status> {
        let payment = self.app.get(&request.into_inner().id).await?;
        Ok(Response::new(payment.into()))
    }

    async fn update_payment(
        &self,
        request: Request<UpdatePaymentRequest>,
    ) -> Result<Response<Payment>, Status> {
        let req = request.into_inner();
        let payment = self.app.update_status(&req.id, &req.status).await?;
        Ok(Response::new(payment.into()))
    }

    async fn delete_payment(
        &self,
        request: Request<GetByIdRequest>,
    ) -> Result<Response<Empty>, Status> {
        self.app.delete(&request.into_inner().id).await?;
        Ok(Response::new(Empty {}))
    }
}

/// Serve `PaymentService` until the shutdown channel fires
pub async fn start_grpc_server(
    addr: SocketAddr,
    app: PaymentApp,
    jwt: Arc<JwtManager>,
    mut shutdown: broadcast::Receiver<()>,
) -> Result<(), tonic::transport::Error> {
    info!(%addr, "Payment gRPC server listening");

    Server::builder()
        .add_service(PaymentServiceImpl::new(app).into_server(jwt))
        .serve_with_shutdown(addr, async move {
            let _ = shutdown.recv().await;
        })
        .await
}
