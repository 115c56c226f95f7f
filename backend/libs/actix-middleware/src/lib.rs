//! # Actix Middleware Library
//!
//! Shared middleware components for Storefront Actix services
//!
//! ## Modules
//! - `jwt_auth`: JWT authentication middleware and the `AuthenticatedUser` extractor

pub mod jwt_auth;

pub use jwt_auth::{AuthenticatedUser, JwtAuthMiddleware, DEFAULT_EXEMPT_PATHS};
