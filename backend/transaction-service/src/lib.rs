// Transaction Service Library
//
// A transaction is only recorded after the product and the payment it
// references have both been confirmed by their owning services.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod jobs;
pub mod models;
pub mod saga;
pub mod services;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::Transaction;
pub use services::TransactionApp;
