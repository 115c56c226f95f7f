use crate::db::ProductRepository;
use crate::error::{AppError, AppResult};
use crate::models::{Product, ProductInput};
use bson::oid::ObjectId;
use chrono::Utc;
use db_pool::parse_object_id;
use resilience::with_timeout_result;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use validator::Validate;

#[derive(Clone)]
pub struct ProductApp {
    repo: Arc<dyn ProductRepository>,
    store_timeout: Duration,
}

fn parse_id(id: &str) -> AppResult<ObjectId> {
    parse_object_id(id).ok_or_else(|| AppError::InvalidId(id.to_string()))
}

fn checked(mut input: ProductInput) -> AppResult<ProductInput> {
    input.name = input.name.trim().to_string();
    input.validate()?;
    Ok(input)
}

impl ProductApp {
    pub fn new(repo: Arc<dyn ProductRepository>, store_timeout: Duration) -> Self {
        Self { repo, store_timeout }
    }

    pub async fn create(&self, input: ProductInput) -> AppResult<Product> {
        let input = checked(input)?;

        let product = Product {
            id: ObjectId::new(),
            name: input.name,
            price: input.price,
            stock: input.stock,
            created_at: Utc::now(),
        };
        with_timeout_result(self.store_timeout, self.repo.insert(&product)).await?;

        info!(event = "product_created", product_id = %product.id);
        Ok(product)
    }

    pub async fn list(&self) -> AppResult<Vec<Product>> {
        Ok(with_timeout_result(self.store_timeout, self.repo.find_all()).await?)
    }

    pub async fn get(&self, id: &str) -> AppResult<Product> {
        let oid = parse_id(id)?;
        with_timeout_result(self.store_timeout, self.repo.find_by_id(oid))
            .await?
            .ok_or(AppError::NotFound)
    }

    pub async fn update(&self, id: &str, input: ProductInput) -> AppResult<Product> {
        let oid = parse_id(id)?;
        let input = checked(input)?;

        with_timeout_result(self.store_timeout, self.repo.update(oid, &input))
            .await?
            .ok_or(AppError::NotFound)
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let oid = parse_id(id)?;
        if with_timeout_result(self.store_timeout, self.repo.delete(oid)).await? {
            info!(event = "product_deleted", product_id = %oid);
            Ok(())
        } else {
            Err(AppError::NotFound)
        }
    }
}
