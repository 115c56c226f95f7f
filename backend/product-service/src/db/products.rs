//! Product Repository

use crate::error::AppResult;
use crate::models::{Product, ProductInput};
use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use futures::TryStreamExt;
use mongodb::options::{FindOneAndUpdateOptions, FindOptions, ReturnDocument};
use mongodb::{Collection, Database};

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn insert(&self, product: &Product) -> AppResult<()>;
    async fn find_all(&self) -> AppResult<Vec<Product>>;
    async fn find_by_id(&self, id: ObjectId) -> AppResult<Option<Product>>;
    async fn update(&self, id: ObjectId, input: &ProductInput) -> AppResult<Option<Product>>;
    async fn delete(&self, id: ObjectId) -> AppResult<bool>;
}

pub struct MongoProductRepository {
    collection: Collection<Product>,
}

impl MongoProductRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("products"),
        }
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    async fn insert(&self, product: &Product) -> AppResult<()> {
        self.collection.insert_one(product).await?;
        Ok(())
    }

    async fn find_all(&self) -> AppResult<Vec<Product>> {
        let options = FindOptions::builder().sort(doc! { "created_at": -1 }).build();

        let cursor = self.collection.find(doc! {}).with_options(options).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_by_id(&self, id: ObjectId) -> AppResult<Option<Product>> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    async fn update(&self, id: ObjectId, input: &ProductInput) -> AppResult<Option<Product>> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();
        let update = doc! {
            "$set": {
                "name": &input.name,
                "price": input.price,
                "stock": input.stock,
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
}
