pub mod products;

pub use products::{MongoProductRepository, ProductRepository};
