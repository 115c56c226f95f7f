//! Token authority shared by the gateway and every backend service
//!
//! Tokens are HS256 JWTs signed with a single shared secret loaded from
//! configuration at startup and handed to each component explicitly.
//!
//! ## Security Design
//!
//! - **HS256 ONLY**: `Validation` is pinned to one algorithm, so a token whose
//!   header names `none`, an RSA/EC family or another HMAC width is rejected
//!   with `InvalidAlgorithm` before the signature is even considered
//! - **No leeway**: `exp` is compared against the wall clock exactly
//! - **No revocation list**: expiry is the only way a token stops working
//! - **Fail at startup**: an empty secret cannot build a `JwtManager`
//!
//! ## Usage
//!
//! ```rust
//! use crypto_core::jwt::JwtManager;
//!
//! let manager = JwtManager::new("change-me").expect("JWT_SECRET must not be empty");
//! let token = manager.issue("3f1c...", "user@example.com").unwrap();
//! let claims = manager.verify(&token).unwrap();
//! assert_eq!(claims.email, "user@example.com");
//! ```
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::{debug, warn};

// ============================================================================
// Constants
// ============================================================================

const TOKEN_EXPIRY_HOURS: i64 = 24;

/// JWT algorithm - every Storefront service signs and verifies with HS256
const JWT_ALGORITHM: Algorithm = Algorithm::HS256;

/// Prefix stripped from `Authorization` values when present
const BEARER_PREFIX: &str = "Bearer ";

// ============================================================================
// Data Structures
// ============================================================================

/// Claims embedded in every token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Internal principal id assigned by auth-service
    pub user_id: String,
    /// Unique external identifier of the principal
    pub email: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("JWT secret must not be empty")]
    EmptySecret,
    #[error("Failed to sign token: {0}")]
    Signing(String),
    #[error("Token validation failed: {0}")]
    Invalid(#[from] jsonwebtoken::errors::Error),
}

/// Authentication failure as seen by a transport adapter
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing Authorization header")]
    MissingCredential,
    #[error("Invalid token")]
    InvalidToken(#[source] JwtError),
}

// ============================================================================
// Token Authority
// ============================================================================

/// Issues and verifies tokens with a symmetric key
///
/// Built once at startup and shared read-only (`Arc` / `web::Data`).
#[derive(Clone)]
pub struct JwtManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl fmt::Debug for JwtManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtManager")
            .field("secret", &"[REDACTED]")
            .field("algorithm", &JWT_ALGORITHM)
            .finish()
    }
}

impl JwtManager {
    /// Build a manager from the shared secret
    ///
    /// ## Errors
    ///
    /// Returns `JwtError::EmptySecret` if `secret` is empty. Callers treat
    /// this as a fatal misconfiguration and abort startup.
    pub fn new(secret: &str) -> Result<Self, JwtError> {
        if secret.is_empty() {
            return Err(JwtError::EmptySecret);
        }

        let mut validation = Validation::new(JWT_ALGORITHM);
        validation.validate_exp = true;
        validation.leeway = 0;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        })
    }

    /// Issue a token valid for 24 hours
    pub fn issue(&self, user_id: &str, email: &str) -> Result<String, JwtError> {
        let expiry = Utc::now() + Duration::hours(TOKEN_EXPIRY_HOURS);

        self.sign(&Claims {
            user_id: user_id.to_string(),
            email: email.to_string(),
            exp: expiry.timestamp(),
        })
    }

    fn sign(&self, claims: &Claims) -> Result<String, JwtError> {
        encode(&Header::new(JWT_ALGORITHM), claims, &self.encoding_key)
            .map_err(|e| JwtError::Signing(e.to_string()))
    }

    /// Verify signature, algorithm and expiry, returning the embedded claims
    ///
    /// `token` must not carry the `Bearer ` prefix; use [`verify_credential`]
    /// for raw header values.
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(data.claims)
    }
}

// ============================================================================
// Transport-agnostic credential check
// ============================================================================

/// Check a raw `Authorization` value the same way on every transport
///
/// - absent or blank value: `MissingCredential`
/// - `Bearer ` prefix stripped when present, tolerated when absent
/// - anything the token authority rejects: `InvalidToken`
///
/// Token contents are never logged.
pub fn verify_credential(manager: &JwtManager, header: Option<&str>) -> Result<Claims, AuthError> {
    let raw = header
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| {
            debug!("Request carried no credential");
            AuthError::MissingCredential
        })?;

    let token = raw.strip_prefix(BEARER_PREFIX).unwrap_or(raw).trim();

    manager.verify(token).map_err(|e| {
        warn!(error = %e, "JWT validation failed");
        AuthError::InvalidToken(e)
    })
}

// ============================================================================
// Tests
// ============================================================================
