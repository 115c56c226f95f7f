#![allow(dead_code)]

use async_trait::async_trait;
use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use transaction_service::config::UpstreamConfig;
use transaction_service::db::{SweepOutcome, TransactionRepository};
use transaction_service::models::{STATUS_FAILED, STATUS_PENDING};
use transaction_service::saga::PurchaseSaga;
use transaction_service::{AppResult, Transaction, TransactionApp};

/// In-memory store applying the same filters as the Mongo repository
#[derive(Default)]
pub struct InMemoryTransactions {
    pub rows: Mutex<Vec<Transaction>>,
}

impl InMemoryTransactions {
    pub fn seed(&self, status: &str, created_at: DateTime<Utc>) -> ObjectId {
        let id = ObjectId::new();
        self.rows.lock().unwrap().push(Transaction {
            id,
            product_id: ObjectId::new(),
            payment_id: ObjectId::new(),
            quantity: 1,
            total: 10.0,
            status: status.to_string(),
            created_at,
            updated_at: created_at,
        });
        id
    }

    pub fn status_of(&self, id: ObjectId) -> String {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id == id)
            .map(|t| t.status.clone())
            .unwrap()
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl TransactionRepository for InMemoryTransactions {
    async fn insert(&self, transaction: &Transaction) -> AppResult<()> {
        self.rows.lock().unwrap().push(transaction.clone());
        Ok(())
    }

    async fn find_all(&self) -> AppResult<Vec<Transaction>> {
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: ObjectId) -> AppResult<Option<Transaction>> {
        Ok(self.rows.lock().unwrap().iter().find(|t| t.id == id).cloned())
    }

    async fn update_status(
        &self,
        id: ObjectId,
        status: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Option<Transaction>> {
        let mut rows = self.rows.lock().unwrap();
        Ok(rows.iter_mut().find(|t| t.id == id).map(|t| {
            t.status = status.to_string();
            t.updated_at = now;
            t.clone()
        }))
    }

    async fn delete(&self, id: ObjectId) -> AppResult<bool> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|t| t.id != id);
        Ok(rows.len() != before)
    }

    async fn expire_pending(&self, cutoff: DateTime<Utc>, now: DateTime<Utc>) -> AppResult<SweepOutcome> {
        let mut outcome = SweepOutcome::default();
        for t in self.rows.lock().unwrap().iter_mut() {
            if t.status == STATUS_PENDING && t.created_at < cutoff {
                t.status = STATUS_FAILED.to_string();
                t.updated_at = now;
                outcome.matched += 1;
                outcome.modified += 1;
            }
        }
        Ok(outcome)
    }
}

pub fn app(repo: Arc<InMemoryTransactions>, product_url: &str, payment_url: &str) -> TransactionApp {
    let saga = PurchaseSaga::new(&UpstreamConfig {
        product_url: product_url.to_string(),
        payment_url: payment_url.to_string(),
        request_timeout_secs: 2,
    })
    .unwrap();

    TransactionApp::new(repo, saga, Duration::from_secs(1))
}
