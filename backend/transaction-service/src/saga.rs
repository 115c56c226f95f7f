//! Purchase validation across product-service and payment-service
//!
//! A transaction is recorded only after two read-only phases succeed, in order:
//!
//! 1. `ProductCheck`: `GET {PRODUCT_URL}/products/{id}` must answer `200` with a
//!    body carrying `price`
//! 2. `PaymentCheck`: `GET {PAYMENT_URL}/payments/{id}` must answer `200`
//!
//! Neither phase writes anything, so a failure needs no compensation. A phase
//! that writes must come with a compensating step before it is added here.

use crate::config::UpstreamConfig;
use bson::oid::ObjectId;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

/// Outcome of the product phase
#[derive(Debug, Clone, PartialEq)]
pub enum ProductCheck {
    ProductOk(f64),
    ProductFailed(String),
}

/// Outcome of the payment phase
#[derive(Debug, Clone, PartialEq)]
pub enum PaymentCheck {
    PaymentOk,
    PaymentFailed(String),
}

/// Why the saga stopped
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SagaFailure {
    #[error("{0}")]
    Product(String),
    #[error("{0}")]
    Payment(String),
}

/// Values confirmed by a completed saga
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfirmedPurchase {
    pub unit_price: f64,
    pub total: f64,
}

#[derive(Debug, Deserialize)]
struct ProductPrice {
    price: f64,
}

/// Runs the two phases with a shared, timeout-bounded HTTP client
#[derive(Clone)]
pub struct PurchaseSaga {
    client: Client,
    product_url: String,
    payment_url: String,
}

impl PurchaseSaga {
    /// Build with a client whose timeout comes from configuration
    pub fn new(upstreams: &UpstreamConfig) -> reqwest::Result<Self> {
        let client = Client::builder().timeout(upstreams.request_timeout()).build()?;
        Ok(Self::with_client(client, upstreams))
    }

    pub fn with_client(client: Client, upstreams: &UpstreamConfig) -> Self {
        Self {
            client,
            product_url: upstreams.product_url.trim_end_matches('/').to_string(),
            payment_url: upstreams.payment_url.trim_end_matches('/').to_string(),
        }
    }

    async fn fetch(&self, url: String, authorization: Option<&str>) -> reqwest::Result<reqwest::Response> {
        let mut request = self.client.get(url);
        if let Some(value) = authorization {
            request = request.header(AUTHORIZATION, value);
        }
        request.send().await
    }

    pub async fn check_product(&self, product_id: &ObjectId, authorization: Option<&str>) -> ProductCheck {
        const UNAVAILABLE: &str = "product not found or unreachable";

        let url = format!("{}/products/{}", self.product_url, product_id.to_hex());
        let response = match self.fetch(url, authorization).await {
            Ok(resp) if resp.status() == StatusCode::OK => resp,
            Ok(resp) => {
                debug!(product_id = %product_id, status = %resp.status(), "Product check refused");
                return ProductCheck::ProductFailed(UNAVAILABLE.to_string());
            }
            Err(e) => {
                warn!(product_id = %product_id, error = %e, "Product service unreachable");
                return ProductCheck::ProductFailed(UNAVAILABLE.to_string());
            }
        };

        match response.json::<ProductPrice>().await {
            Ok(product) => ProductCheck::ProductOk(product.price),
            Err(e) => {
                warn!(product_id = %product_id, error = %e, "Product response had no usable price");
                ProductCheck::ProductFailed("failed to decode product".to_string())
            }
        }
    }

    pub async fn check_payment(&self, payment_id: &ObjectId, authorization: Option<&str>) -> PaymentCheck {
        let url = format!("{}/payments/{}", self.payment_url, payment_id.to_hex());
        match self.fetch(url, authorization).await {
            Ok(resp) if resp.status() == StatusCode::OK => PaymentCheck::PaymentOk,
            Ok(resp) => {
                debug!(payment_id = %payment_id, status = %resp.status(), "Payment check refused");
                PaymentCheck::PaymentFailed("payment not found or unreachable".to_string())
            }
            Err(e) => {
                warn!(payment_id = %payment_id, error = %e, "Payment service unreachable");
                PaymentCheck::PaymentFailed("payment not found or unreachable".to_string())
            }
        }
    }

    /// Run both phases in order and price the purchase
    pub async fn run(
        &self,
        product_id: &ObjectId,
        payment_id: &ObjectId,
        quantity: i64,
        authorization: Option<&str>,
    ) -> Result<ConfirmedPurchase, SagaFailure> {
        let unit_price = match self.check_product(product_id, authorization).await {
            ProductCheck::ProductOk(price) => price,
            ProductCheck::ProductFailed(reason) => return Err(SagaFailure::Product(reason)),
        };

        if let PaymentCheck::PaymentFailed(reason) = self.check_payment(payment_id, authorization).await {
            return Err(SagaFailure::Payment(reason));
        }

        Ok(ConfirmedPurchase {
            unit_price,
            total: quantity as f64 * unit_price,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn saga(server: &MockServer) -> PurchaseSaga {
        PurchaseSaga::new(&UpstreamConfig {
            product_url: server.uri(),
            payment_url: server.uri(),
            request_timeout_secs: 2,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_product_phase_reads_price() {
        let server = MockServer::start().await;
        let product_id = ObjectId::new();
        Mock::given(method("GET"))
            .and(path(format!("/products/{}", product_id.to_hex())))
            .and(header("authorization", "Bearer t"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": product_id.to_hex(), "price": 12.5})))
            .expect(1)
            .mount(&server)
            .await;

        let check = saga(&server).check_product(&product_id, Some("Bearer t")).await;
        assert_eq!(check, ProductCheck::ProductOk(12.5));
    }

    #[tokio::test]
    async fn test_only_200_counts() {
        let server = MockServer::start().await;
        let product_id = ObjectId::new();
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"price": 1.0})))
            .mount(&server)
            .await;

        assert!(matches!(
            saga(&server).check_product(&product_id, None).await,
            ProductCheck::ProductFailed(_)
        ));
        assert!(matches!(
            saga(&server).check_payment(&ObjectId::new(), None).await,
            PaymentCheck::PaymentFailed(_)
        ));
    }

    #[tokio::test]
    async fn test_undecodable_product_fails() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        assert_eq!(
            saga(&server).check_product(&ObjectId::new(), None).await,
            ProductCheck::ProductFailed("failed to decode product".to_string())
        );
    }

    #[tokio::test]
    async fn test_payment_not_checked_when_product_fails() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(wiremock::matchers::path_regex("^/products/.*"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(wiremock::matchers::path_regex("^/payments/.*"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let result = saga(&server).run(&ObjectId::new(), &ObjectId::new(), 2, None).await;
        assert_eq!(
            result,
            Err(SagaFailure::Product("product not found or unreachable".to_string()))
        );
    }

    #[tokio::test]
    async fn test_unreachable_backend() {
        let saga = PurchaseSaga::new(&UpstreamConfig {
            product_url: "http://127.0.0.1:1".to_string(),
            payment_url: "http://127.0.0.1:1".to_string(),
            request_timeout_secs: 1,
        })
        .unwrap();

        assert!(matches!(
            saga.check_payment(&ObjectId::new(), None).await,
            PaymentCheck::PaymentFailed(_)
        ));
    }

    #[tokio::test]
    async fn test_total_is_quantity_times_price() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(wiremock::matchers::path_regex("^/products/.*"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"price": 2.25})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(wiremock::matchers::path_regex("^/payments/.*"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "success"})))
            .mount(&server)
            .await;

        let confirmed = saga(&server)
            .run(&ObjectId::new(), &ObjectId::new(), 4, None)
            .await
            .unwrap();
        assert_eq!(confirmed.unit_price, 2.25);
        assert_eq!(confirmed.total, 9.0);
    }
}
