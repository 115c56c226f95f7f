/// Error types for transaction-service
use crate::saga::SagaFailure;
use error_types::ServiceError;
use resilience::TimeoutError;
use std::time::Duration;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("invalid {field}: {value}")]
    InvalidId { field: &'static str, value: String },

    #[error("transaction not found")]
    NotFound,

    /// Product or payment check refused the purchase
    #[error(transparent)]
    Rejected(#[from] SagaFailure),

    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("Store call timed out after {0:?}")]
    StoreTimeout(Duration),
}

impl From<TimeoutError<AppError>> for AppError {
    fn from(err: TimeoutError<AppError>) -> Self {
        match err {
            TimeoutError::Elapsed(after) => AppError::StoreTimeout(after),
            TimeoutError::OperationFailed(inner) => inner,
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(error_types::validation_message(&errors))
    }
}

impl From<AppError> for ServiceError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Validation(_) | AppError::InvalidId { .. } | AppError::Rejected(_) => {
                ServiceError::BadRequest(err.to_string())
            }
            AppError::NotFound => ServiceError::NotFound(err.to_string()),
            AppError::Database(_) | AppError::StoreTimeout(_) => ServiceError::internal(err),
        }
    }
}
