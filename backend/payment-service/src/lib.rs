// Payment Service Library

pub mod config;
pub mod db;
pub mod error;
pub mod grpc;
pub mod handlers;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::Payment;
pub use services::PaymentApp;
