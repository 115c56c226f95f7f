//! Product catalogue service
//!
//! Plain REST CRUD over the Mongo `products` collection. The transaction
//! service reads `GET /products/{id}` to price a purchase.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;

pub use config::Config;
pub use db::{MongoProductRepository, ProductRepository};
pub use error::{AppError, AppResult};
pub use models::{Product, ProductInput, ProductView};
pub use services::ProductApp;
