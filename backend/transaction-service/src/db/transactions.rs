//! Transaction Repository

use crate::error::AppResult;
use crate::models::{Transaction, STATUS_FAILED, STATUS_PENDING};
use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::options::{FindOneAndUpdateOptions, FindOptions, ReturnDocument};
use mongodb::{Collection, Database};

/// Counts reported by one bulk expiry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepOutcome {
    pub matched: u64,
    pub modified: u64,
}

#[async_trait]
pub trait TransactionRepository: Send + Sync {
    async fn insert(&self, transaction: &Transaction) -> AppResult<()>;
    async fn find_all(&self) -> AppResult<Vec<Transaction>>;
    async fn find_by_id(&self, id: ObjectId) -> AppResult<Option<Transaction>>;
    async fn update_status(
        &self,
        id: ObjectId,
        status: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Option<Transaction>>;
    async fn delete(&self, id: ObjectId) -> AppResult<bool>;

    /// Move every pending transaction created before `cutoff` to failed
    async fn expire_pending(&self, cutoff: DateTime<Utc>, now: DateTime<Utc>) -> AppResult<SweepOutcome>;
}

pub struct MongoTransactionRepository {
    collection: Collection<Transaction>,
}

impl MongoTransactionRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("transactions"),
        }
    }
}

#[async_trait]
impl TransactionRepository for MongoTransactionRepository {
    async fn insert(&self, transaction: &Transaction) -> AppResult<()> {
        self.collection.insert_one(transaction).await?;
        Ok(())
    }

    async fn find_all(&self) -> AppResult<Vec<Transaction>> {
        let options = FindOptions::builder().sort(doc! { "created_at": -1 }).build();

        let cursor = self.collection.find(doc! {}).with_options(options).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_by_id(&self, id: ObjectId) -> AppResult<Option<Transaction>> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    async fn update_status(
        &self,
        id: ObjectId,
        status: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Option<Transaction>> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();
        let update = doc! {
            "$set": {
                "status": status,
                "updated_at": bson::DateTime::from_chrono(now),
            }
        };

        Ok(self
            .collection
            .find_one_and_update(doc! { "_id": id }, update)
            .with_options(options)
            .await?)
    }

    async fn delete(&self, id: ObjectId) -> AppResult<bool> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }

    async fn expire_pending(&self, cutoff: DateTime<Utc>, now: DateTime<Utc>) -> AppResult<SweepOutcome> {
        let filter = doc! {
            "status": STATUS_PENDING,
            "created_at": { "$lt": bson::DateTime::from_chrono(cutoff) },
        };
        let update = doc! {
            "$set": {
                "status": STATUS_FAILED,
                "updated_at": bson::DateTime::from_chrono(now),
            }
        };

        let result = self.collection.update_many(filter, update).await?;
        Ok(SweepOutcome {
            matched: result.matched_count,
            modified: result.modified_count,
        })
    }
}
