/// gRPC Register/Login over a real in-process tonic server
mod common;

use auth_service::grpc::AuthServiceImpl;
use grpc_clients::proto::auth::{auth_service_client::AuthServiceClient, LoginRequest, RegisterRequest};
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::{Channel, Server};
use tonic::Code;

async fn spawn_server() -> AuthServiceClient<Channel> {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let svc = AuthServiceImpl::new(common::app(common::jwt())).into_server();

    tokio::spawn(async move {
        Server::builder()
            .add_service(svc)
            .serve_with_incoming(TcpListenerStream::new(listener))
            .await
            .unwrap();
    });

    AuthServiceClient::connect(format!("http://{}", addr)).await.unwrap()
}

#[tokio::test]
async fn test_register_and_login_without_credentials() {
    let mut client = spawn_server().await;

    let registered = client
        .register(RegisterRequest {
            name: "Dee".into(),
            email: "dee@example.com".into(),
            password: "pw".into(),
        })
        .await
        .unwrap()
        .into_inner();
    assert_eq!(registered.email, "dee@example.com");
    assert!(!registered.id.is_empty());

    let login = client
        .login(LoginRequest {
            email: "dee@example.com".into(),
            password: "pw".into(),
        })
        .await
        .unwrap()
        .into_inner();
    assert_eq!(login.email, "dee@example.com");
    assert!(common::jwt().verify(&login.token).is_ok());
}

#[tokio::test]
async fn test_status_codes() {
    let mut client = spawn_server().await;

    let err = client
        .register(RegisterRequest {
            name: "E".into(),
            email: "".into(),
            password: "pw".into(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.code(), Code::InvalidArgument);

    let dup = RegisterRequest {
        name: "E".into(),
        email: "e@example.com".into(),
        password: "pw".into(),
    };
    client.register(dup.clone()).await.unwrap();
    assert_eq!(client.register(dup).await.unwrap_err().code(), Code::AlreadyExists);

    let err = client
        .login(LoginRequest {
            email: "e@example.com".into(),
            password: "wrong".into(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.code(), Code::Unauthenticated);
}
