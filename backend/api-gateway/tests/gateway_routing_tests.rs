/// Authentication and route resolution at the edge, with no backend running
mod common;

use actix_middleware::JwtAuthMiddleware;
use actix_web::{http::StatusCode, test, web, App};
use api_gateway::{configure, GATEWAY_EXEMPT_PATHS};
use serde_json::Value;

macro_rules! gateway_app {
    ($gateway:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($gateway))
                .wrap(JwtAuthMiddleware::with_exempt_paths(common::jwt(), GATEWAY_EXEMPT_PATHS))
                .configure(configure),
        )
        .await
    };
}

#[actix_web::test]
async fn test_health_is_public() {
    let svc = gateway_app!(common::offline_gateway());

    let resp = test::call_service(&svc, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
}

#[actix_web::test]
async fn test_protected_route_without_token() {
    let svc = gateway_app!(common::offline_gateway());

    let resp = test::call_service(&svc, test::TestRequest::get().uri("/products").to_request()).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Missing Authorization header");
}

#[actix_web::test]
async fn test_protected_route_with_bad_token() {
    let svc = gateway_app!(common::offline_gateway());

    let req = test::TestRequest::get()
        .uri("/api/payments-grpc")
        .insert_header(("Authorization", "Bearer not-a-token"))
        .to_request();
    let resp = test::call_service(&svc, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Invalid token");
}

#[actix_web::test]
async fn test_token_from_another_issuer_is_rejected() {
    let svc = gateway_app!(common::offline_gateway());

    let foreign = crypto_core::JwtManager::new("someone-elses-secret").unwrap();
    let token = foreign.issue("user-1", "a@b.com").unwrap();
    let req = test::TestRequest::get()
        .uri("/transactions")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();

    let resp = test::call_service(&svc, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_unknown_route_is_404_after_auth() {
    let svc = gateway_app!(common::offline_gateway());

    let req = test::TestRequest::get()
        .uri("/unknown")
        .insert_header(("Authorization", common::bearer()))
        .to_request();
    let resp = test::call_service(&svc, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "route not found");

    // authentication runs before route matching
    let resp = test::call_service(&svc, test::TestRequest::get().uri("/unknown").to_request()).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_method_not_routed_for_rpc_path() {
    let svc = gateway_app!(common::offline_gateway());

    let req = test::TestRequest::patch()
        .uri("/payments-grpc/abc")
        .insert_header(("Authorization", common::bearer()))
        .to_request();
    let resp = test::call_service(&svc, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_unreachable_rest_backend_is_502() {
    let svc = gateway_app!(common::offline_gateway());

    let req = test::TestRequest::get()
        .uri("/products")
        .insert_header(("Authorization", common::bearer()))
        .to_request();
    let resp = test::call_service(&svc, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Failed to connect to downstream service");
}

#[actix_web::test]
async fn test_unreachable_rpc_backend_is_502() {
    let svc = gateway_app!(common::offline_gateway());

    let req = test::TestRequest::get()
        .uri("/payments-grpc")
        .insert_header(("Authorization", common::bearer()))
        .to_request();
    let resp = test::call_service(&svc, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
}

#[actix_web::test]
async fn test_login_is_public_but_still_needs_a_valid_body() {
    let svc = gateway_app!(common::offline_gateway());

    let req = test::TestRequest::post()
        .uri("/api/login")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{broken")
        .to_request();
    let resp = test::call_service(&svc, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Invalid request");
}
