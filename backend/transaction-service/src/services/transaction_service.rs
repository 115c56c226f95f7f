use crate::db::TransactionRepository;
use crate::error::{AppError, AppResult};
use crate::models::{CreateTransactionBody, Transaction, UpdateTransactionBody, STATUS_SUCCESS};
use crate::saga::PurchaseSaga;
use bson::oid::ObjectId;
use chrono::Utc;
use db_pool::parse_object_id;
use resilience::with_timeout_result;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use validator::Validate;

#[derive(Clone)]
pub struct TransactionApp {
    repo: Arc<dyn TransactionRepository>,
    saga: PurchaseSaga,
    store_timeout: Duration,
}

fn parse_id(field: &'static str, value: &str) -> AppResult<ObjectId> {
    parse_object_id(value).ok_or_else(|| AppError::InvalidId {
        field,
        value: value.to_string(),
    })
}

impl TransactionApp {
    pub fn new(repo: Arc<dyn TransactionRepository>, saga: PurchaseSaga, store_timeout: Duration) -> Self {
        Self {
            repo,
            saga,
            store_timeout,
        }
    }

    pub fn repository(&self) -> Arc<dyn TransactionRepository> {
        self.repo.clone()
    }

    /// Validate against product and payment services, then record
    ///
    /// `authorization` is the caller's header, forwarded so the backends
    /// authenticate the same principal. Nothing is written unless both
    /// checks pass.
    pub async fn create(&self, body: CreateTransactionBody, authorization: Option<&str>) -> AppResult<Transaction> {
        let product_id = parse_id("product_id", &body.product_id)?;
        let payment_id = parse_id("payment_id", &body.payment_id)?;
        body.validate()?;

        let confirmed = self
            .saga
            .run(&product_id, &payment_id, body.quantity, authorization)
            .await
            .map_err(|e| {
                warn!(event = "transaction_rejected", %product_id, %payment_id, reason = %e);
                e
            })?;

        let now = Utc::now();
        let transaction = Transaction {
            id: ObjectId::new(),
            product_id,
            payment_id,
            quantity: body.quantity,
            total: confirmed.total,
            status: STATUS_SUCCESS.to_string(),
            created_at: now,
            updated_at: now,
        };
        with_timeout_result(self.store_timeout, self.repo.insert(&transaction)).await?;

        info!(
            event = "transaction_created",
            transaction_id = %transaction.id,
            total = transaction.total
        );
        Ok(transaction)
    }

    pub async fn list(&self) -> AppResult<Vec<Transaction>> {
        Ok(with_timeout_result(self.store_timeout, self.repo.find_all()).await?)
    }

    pub async fn get(&self, id: &str) -> AppResult<Transaction> {
        let oid = parse_id("transaction id", id)?;
        with_timeout_result(self.store_timeout, self.repo.find_by_id(oid))
            .await?
            .ok_or(AppError::NotFound)
    }

    pub async fn update_status(&self, id: &str, status: &str) -> AppResult<Transaction> {
        let oid = parse_id("transaction id", id)?;
        let input = UpdateTransactionBody {
            status: status.trim().to_string(),
        };
        input.validate()?;

        with_timeout_result(self.store_timeout, self.repo.update_status(oid, &input.status, Utc::now()))
            .await?
            .ok_or(AppError::NotFound)
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let oid = parse_id("transaction id", id)?;
        match with_timeout_result(self.store_timeout, self.repo.delete(oid)).await? {
            true => Ok(()),
            false => Err(AppError::NotFound),
        }
    }
}
