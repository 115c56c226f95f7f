//! Shared token authority for Storefront services
//!
//! Every service that issues or checks bearer tokens goes through [`JwtManager`].
//! Transport adapters (actix middleware, tonic interceptor) call
//! [`verify_credential`] so the header parsing policy lives in one place.

pub mod jwt;

pub use jwt::{verify_credential, AuthError, Claims, JwtError, JwtManager};
