// Auth Service Library

pub mod config;
pub mod db;
pub mod error;
pub mod grpc;
pub mod handlers;
pub mod models;
pub mod security;
pub mod services;

pub use config::Config;
pub use error::{AuthError, AuthResult};
pub use models::User;
pub use services::AuthApp;
