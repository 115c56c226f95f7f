//! Payment repository

use crate::error::AppResult;
use crate::models::Payment;
use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use futures::TryStreamExt;
use mongodb::options::{FindOneAndUpdateOptions, FindOptions, ReturnDocument};
use mongodb::{Collection, Database};

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn insert(&self, payment: &Payment) -> AppResult<()>;
    async fn find_all(&self) -> AppResult<Vec<Payment>>;
    async fn find_by_id(&self, id: ObjectId) -> AppResult<Option<Payment>>;
    /// Returns the updated document, or `None` when nothing matched
    async fn update_status(&self, id: ObjectId, status: &str) -> AppResult<Option<Payment>>;
    /// Returns whether a document was removed
    async fn delete(&self, id: ObjectId) -> AppResult<bool>;
}

pub struct MongoPaymentRepository {
    collection: Collection<Payment>,
}

impl MongoPaymentRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("payments"),
        }
    }
}

#[async_trait]
impl PaymentRepository for MongoPaymentRepository {
    async fn insert(&self, payment: &Payment) -> AppResult<()> {
        self.collection.insert_one(payment).await?;
        Ok(())
    }

    async fn find_all(&self) -> AppResult<Vec<Payment>> {
        let options = FindOptions::builder().sort(doc! { "created_at": -1 }).build();

        let cursor = self.collection.find(doc! {}).with_options(options).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_by_id(&self, id: ObjectId) -> AppResult<Option<Payment>> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    async fn update_status(&self, id: ObjectId, status: &str) -> AppResult<Option<Payment>> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        Ok(self
            .collection
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": { "status": status } })
            .with_options(options)
            .await?)
    }

    async fn delete(&self, id: ObjectId) -> AppResult<bool> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }
}
