//! Unified error types for Storefront services
//!
//! Every failure a client can observe goes through [`ServiceError`], which
//! maps to exactly one HTTP status and one gRPC code, and renders as the
//! fixed [`ErrorResponse`] body.
//!
//! # Design Principles
//!
//! 1. **One body shape**: every HTTP error is `{"error": "<message>"}`
//! 2. **No internals on the wire**: `Internal` logs its source and returns a short message
//! 3. **gRPC Integration**: maps cleanly to and from `tonic::Status`
//! 4. **Validation**: `validator` failures surface as one readable message

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tonic::{Code, Status};
use validator::ValidationErrors;

/// JSON error body shared by every HTTP endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Core service error type used across all Storefront services
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Missing, invalid or expired credential
    #[error("{0}")]
    Unauthenticated(String),

    /// Malformed body or identifier, or a failed business rule
    #[error("{0}")]
    BadRequest(String),

    /// Unmatched route or missing record
    #[error("{0}")]
    NotFound(String),

    /// Duplicate resource (e.g. email already registered)
    #[error("{0}")]
    Conflict(String),

    /// Downstream unreachable, timed out or failed
    #[error("{0}")]
    BadGateway(String),

    /// Unexpected local fault (catch-all)
    #[error("Internal server error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl ServiceError {
    /// Create internal error from any error type
    pub fn internal<E: Into<anyhow::Error>>(error: E) -> Self {
        Self::Internal {
            source: error.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::BadGateway(_) => StatusCode::BAD_GATEWAY,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Convert to gRPC Status for service boundaries
    pub fn to_status(&self) -> Status {
        let message = self.to_string();
        match self {
            Self::Unauthenticated(_) => Status::unauthenticated(message),
            Self::BadRequest(_) => Status::invalid_argument(message),
            Self::NotFound(_) => Status::not_found(message),
            Self::Conflict(_) => Status::already_exists(message),
            Self::BadGateway(_) => Status::unavailable(message),
            Self::Internal { .. } => Status::internal(message),
        }
    }

    /// Map a status returned by a gRPC backend back into the taxonomy
    pub fn from_status(status: &Status) -> Self {
        let message = status.message().to_string();
        match status.code() {
            Code::Unauthenticated => Self::Unauthenticated(message),
            Code::InvalidArgument => Self::BadRequest(message),
            Code::NotFound => Self::NotFound(message),
            Code::AlreadyExists => Self::Conflict(message),
            Code::Unavailable | Code::DeadlineExceeded => Self::BadGateway(message),
            _ => Self::internal(anyhow::anyhow!("gRPC error: {}", status)),
        }
    }

    /// Log error with appropriate level and context
    pub fn log(&self) {
        match self {
            Self::BadRequest(_) | Self::NotFound(_) | Self::Conflict(_) => {
                tracing::debug!(error = %self, "Client error");
            }
            Self::Unauthenticated(_) => {
                tracing::warn!(error = %self, "Authentication failure");
            }
            Self::BadGateway(_) => {
                tracing::warn!(error = %self, "Dependency issue");
            }
            Self::Internal { source } => {
                tracing::error!(error = ?source, "Server error");
            }
        }
    }
}

/// First failed rule as a client-facing message
///
/// Fields are visited in name order so the same input always yields the same
/// message. Rules without an explicit `message` fall back to `"<field> is invalid"`.
pub fn validation_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by_key(|(field, _)| field.to_string());

    fields
        .into_iter()
        .find_map(|(field, failures)| {
            failures.first().map(|failure| match &failure.message {
                Some(message) => message.to_string(),
                None => format!("{} is invalid", field),
            })
        })
        .unwrap_or_else(|| errors.to_string())
}

impl From<ServiceError> for Status {
    fn from(error: ServiceError) -> Self {
        error.log();
        error.to_status()
    }
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        ServiceError::status_code(self)
    }

    fn error_response(&self) -> HttpResponse {
        self.log();
        HttpResponse::build(ServiceError::status_code(self)).json(ErrorResponse::new(self.to_string()))
    }
}
