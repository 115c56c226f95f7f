//! JSON <-> gRPC translation
//!
//! The inbound body is decoded straight into the proto request message
//! (generated types derive serde, missing fields take their zero value),
//! the call is made, and the reply is encoded back as JSON with `200`.
//!
//! Failures:
//! - body does not decode: `400`
//! - backend unreachable or timed out: `502` with the connect-failure message
//! - backend returned any other status: `502` carrying the status message

use crate::routes::{AuthOp, PaymentOp};
use actix_web::HttpResponse;
use error_types::ServiceError;
use grpc_clients::proto::auth::{LoginRequest, RegisterRequest};
use grpc_clients::proto::payment::{
    CreatePaymentRequest, Empty, GetByIdRequest, PaymentList, UpdatePaymentRequest,
};
use grpc_clients::ServiceClients;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tonic::{Response, Status};

const UNREACHABLE: &str = "Failed to connect to downstream service";

fn decode<T: DeserializeOwned>(body: &[u8], message: &str) -> Result<T, ServiceError> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::debug!(error = %e, "Rejected RPC request body");
        ServiceError::BadRequest(message.to_string())
    })
}

/// Every backend status answers `502`; transport-level failures get the same
/// message as an unreachable REST backend
fn rpc_failed(status: Status) -> ServiceError {
    tracing::warn!(code = ?status.code(), message = %status.message(), "gRPC backend call failed");

    match ServiceError::from_status(&status) {
        ServiceError::BadGateway(_) => ServiceError::BadGateway(UNREACHABLE.to_string()),
        _ if status.message().is_empty() => {
            ServiceError::BadGateway(status.code().description().to_string())
        }
        _ => ServiceError::BadGateway(status.message().to_string()),
    }
}

fn ok_json<T: Serialize>(reply: Result<Response<T>, Status>) -> Result<HttpResponse, ServiceError> {
    let reply = reply.map_err(rpc_failed)?.into_inner();
    Ok(HttpResponse::Ok().json(reply))
}

/// Call `PaymentService`, re-attaching the caller's `authorization`
pub async fn translate_payment(
    clients: &ServiceClients,
    op: PaymentOp,
    id: Option<&str>,
    authorization: Option<&str>,
    body: &[u8],
) -> Result<HttpResponse, ServiceError> {
    let authorization = authorization
        .ok_or_else(|| ServiceError::Unauthenticated("Missing Authorization header".to_string()))?;
    let mut client = clients
        .payment_client(authorization)
        .map_err(|status| ServiceError::Unauthenticated(status.message().to_string()))?;
    let id = id.unwrap_or_default().to_string();

    match op {
        PaymentOp::Create => {
            let request: CreatePaymentRequest = decode(body, "Invalid request body")?;
            ok_json(client.create_payment(request).await)
        }
        PaymentOp::List => {
            let reply = client.get_all_payments(Empty {}).await.map_err(rpc_failed)?;
            let list: PaymentList = reply.into_inner();
            Ok(HttpResponse::Ok().json(list))
        }
        PaymentOp::Get => ok_json(client.get_payment_by_id(GetByIdRequest { id }).await),
        PaymentOp::Update => {
            let mut request: UpdatePaymentRequest = decode(body, "Invalid request body")?;
            // the path wins over any id in the body
            request.id = id;
            ok_json(client.update_payment(request).await)
        }
        PaymentOp::Delete => {
            client
                .delete_payment(GetByIdRequest { id })
                .await
                .map_err(rpc_failed)?;
            Ok(HttpResponse::Ok().json(serde_json::json!({"message": "Payment deleted"})))
        }
    }
}

/// Call `AuthService`; both operations are public
pub async fn translate_auth(
    clients: &ServiceClients,
    op: AuthOp,
    body: &[u8],
) -> Result<HttpResponse, ServiceError> {
    let mut client = clients.auth_client();

    match op {
        AuthOp::Register => {
            let request: RegisterRequest = decode(body, "Invalid request")?;
            ok_json(client.register(request).await)
        }
        AuthOp::Login => {
            let request: LoginRequest = decode(body, "Invalid request")?;
            ok_json(client.login(request).await)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tonic::Code;

    #[test]
    fn test_rpc_failure_carries_status_message() {
        let err = rpc_failed(Status::not_found("payment not found"));
        assert!(matches!(err, ServiceError::BadGateway(ref m) if m == "payment not found"));
    }

    #[test]
    fn test_rpc_failure_without_message_uses_code() {
        let err = rpc_failed(Status::new(Code::FailedPrecondition, ""));
        assert!(matches!(err, ServiceError::BadGateway(ref m) if !m.is_empty()));
    }

    #[test]
    fn test_transport_failures_share_connect_message() {
        for status in [
            Status::unavailable("tcp connect error"),
            Status::deadline_exceeded("Timeout expired"),
        ] {
            let err = rpc_failed(status);
            assert!(matches!(err, ServiceError::BadGateway(ref m) if m == UNREACHABLE));
        }
    }

    #[test]
    fn test_decode_rejects_malformed_body() {
        let err = decode::<CreatePaymentRequest>(b"{not json", "Invalid request body").unwrap_err();
        assert!(matches!(err, ServiceError::BadRequest(ref m) if m == "Invalid request body"));
    }

    #[test]
    fn test_decode_fills_missing_fields() {
        let request: UpdatePaymentRequest = decode(br#"{"status":"refunded"}"#, "x").unwrap();
        assert_eq!(request.status, "refunded");
        assert!(request.id.is_empty());
    }
}
