#![allow(dead_code)]

use async_trait::async_trait;
use bson::oid::ObjectId;
use crypto_core::JwtManager;
use payment_service::db::PaymentRepository;
use payment_service::{AppResult, Payment, PaymentApp};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const SECRET: &str = "payment-service-test-secret";

#[derive(Default)]
pub struct InMemoryPayments {
    rows: Mutex<Vec<Payment>>,
}

#[async_trait]
impl PaymentRepository for InMemoryPayments {
    async fn insert(&self, payment: &Payment) -> AppResult<()> {
        self.rows.lock().unwrap().push(payment.clone());
        Ok(())
    }

    async fn find_all(&self) -> AppResult<Vec<Payment>> {
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: ObjectId) -> AppResult<Option<Payment>> {
        Ok(self.rows.lock().unwrap().iter().find(|p| p.id == id).cloned())
    }

    async fn update_status(&self, id: ObjectId, status: &str) -> AppResult<Option<Payment>> {
        let mut rows = self.rows.lock().unwrap();
        Ok(rows.iter_mut().find(|p| p.id == id).map(|p| {
            p.status = status.to_string();
            p.clone()
        }))
    }

    async fn delete(&self, id: ObjectId) -> AppResult<bool> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|p| p.id != id);
        Ok(rows.len() != before)
    }
}

pub fn jwt() -> Arc<JwtManager> {
    Arc::new(JwtManager::new(SECRET).unwrap())
}

pub fn app() -> PaymentApp {
    PaymentApp::new(Arc::new(InMemoryPayments::default()), Duration::from_secs(1))
}

pub fn bearer(jwt: &JwtManager) -> String {
    format!("Bearer {}", jwt.issue("user-1", "buyer@example.com").unwrap())
}
