/// Payment use cases shared by the REST handlers and the gRPC service
use crate::db::PaymentRepository;
use crate::error::{AppError, AppResult};
use crate::models::{CreatePaymentBody, Payment, UpdatePaymentBody};
use bson::oid::ObjectId;
use db_pool::parse_object_id;
use resilience::with_timeout_result;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use validator::Validate;

#[derive(Clone)]
pub struct PaymentApp {
    repo: Arc<dyn PaymentRepository>,
    store_timeout: Duration,
}

fn parse_id(id: &str) -> AppResult<ObjectId> {
    parse_object_id(id).ok_or_else(|| AppError::InvalidId(id.to_string()))
}

impl PaymentApp {
    pub fn new(repo: Arc<dyn PaymentRepository>, store_timeout: Duration) -> Self {
        Self { repo, store_timeout }
    }

    pub async fn create(&self, email: &str, amount: f64) -> AppResult<Payment> {
        let input = CreatePaymentBody {
            email: email.trim().to_string(),
            amount,
        };
        input.validate()?;
        // range rules let NaN through; gRPC callers can send one
        if amount.is_nan() {
            return Err(AppError::Validation("amount must be greater than 0".to_string()));
        }

        let payment = Payment::new(input.email, input.amount);
        with_timeout_result(self.store_timeout, self.repo.insert(&payment)).await?;

        info!(event = "payment_created", payment_id = %payment.id, amount = payment.amount);
        Ok(payment)
    }

    pub async fn list(&self) -> AppResult<Vec<Payment>> {
        Ok(with_timeout_result(self.store_timeout, self.repo.find_all()).await?)
    }

    pub async fn get(&self, id: &str) -> AppResult<Payment> {
        let oid = parse_id(id)?;
        with_timeout_result(self.store_timeout, self.repo.find_by_id(oid))
            .await?
            .ok_or(AppError::NotFound)
    }

    /// Only the lifecycle status is mutable
    pub async fn update_status(&self, id: &str, status: &str) -> AppResult<Payment> {
        let oid = parse_id(id)?;
        let input = UpdatePaymentBody {
            status: status.trim().to_string(),
        };
        input.validate()?;

        let payment = with_timeout_result(self.store_timeout, self.repo.update_status(oid, &input.status))
            .await?
            .ok_or(AppError::NotFound)?;

        info!(event = "payment_updated", payment_id = %payment.id, status = %payment.status);
        Ok(payment)
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let oid = parse_id(id)?;
        if !with_timeout_result(self.store_timeout, self.repo.delete(oid)).await? {
            return Err(AppError::NotFound);
        }

        info!(event = "payment_deleted", payment_id = %oid);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct InMemoryPayments {
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

    fn app() -> PaymentApp {
        PaymentApp::new(Arc::new(InMemoryPayments::default()), Duration::from_secs(1))
    }

    #[tokio::test]
    async fn test_create_assigns_success_status() {
        let app = app();
        let payment = app.create("a@b.com", 500.0).await.unwrap();

        assert_eq!(payment.email, "a@b.com");
        assert_eq!(payment.amount, 500.0);
        assert_eq!(payment.status, "success");
        assert_eq!(app.get(&payment.id.to_hex()).await.unwrap(), payment);
    }

    #[tokio::test]
    async fn test_create_validation() {
        let app = app();

        assert!(matches!(app.create("", 10.0).await, Err(AppError::Validation(_))));
        assert!(matches!(app.create("a@b.com", 0.0).await, Err(AppError::Validation(_))));
        assert!(matches!(app.create("a@b.com", -3.5).await, Err(AppError::Validation(_))));
        assert!(matches!(app.create("a@b.com", f64::NAN).await, Err(AppError::Validation(_))));
        assert!(app.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_validation_messages() {
        let app = app();

        let err = app.create("a@b.com", 0.0).await.unwrap_err();
        assert_eq!(err.to_string(), "amount must be greater than 0");

        let err = app.create("not-an-email", 5.0).await.unwrap_err();
        assert_eq!(err.to_string(), "email is invalid");
    }

    #[tokio::test]
    async fn test_malformed_id_rejected_before_store() {
        let app = app();

        assert!(matches!(app.get("abc").await, Err(AppError::InvalidId(_))));
        assert!(matches!(app.update_status("abc", "refunded").await, Err(AppError::InvalidId(_))));
        assert!(matches!(app.delete("abc").await, Err(AppError::InvalidId(_))));
    }

    #[tokio::test]
    async fn test_update_status() {
        let app = app();
        let payment = app.create("a@b.com", 10.0).await.unwrap();
        let id = payment.id.to_hex();

        assert!(matches!(app.update_status(&id, " ").await, Err(AppError::Validation(_))));

        let updated = app.update_status(&id, "refunded").await.unwrap();
        assert_eq!(updated.status, "refunded");
        assert_eq!(updated.amount, 10.0);

        let missing = ObjectId::new().to_hex();
        assert!(matches!(app.update_status(&missing, "refunded").await, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_delete_twice_is_not_found() {
        let app = app();
        let keep = app.create("keep@b.com", 1.0).await.unwrap();
        let gone = app.create("gone@b.com", 2.0).await.unwrap();

        app.delete(&gone.id.to_hex()).await.unwrap();
        assert!(matches!(app.delete(&gone.id.to_hex()).await, Err(AppError::NotFound)));

        let left = app.list().await.unwrap();
        assert_eq!(left, vec![keep]);
    }
}
