use error_types::ServiceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Email already registered")]
    EmailAlreadyExists,

    #[error("{0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

pub type AuthResult<T> = std::result::Result<T, AuthError>;

impl From<sqlx::Error> for AuthError {
    fn from(err: sqlx::Error) -> Self {
        AuthError::Database(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AuthError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AuthError::Validation(error_types::validation_message(&errors))
    }
}

impl From<resilience::TimeoutError<AuthError>> for AuthError {
    fn from(err: resilience::TimeoutError<AuthError>) -> Self {
        match err {
            resilience::TimeoutError::Elapsed(d) => {
                AuthError::Database(format!("store call timed out after {:?}", d))
            }
            resilience::TimeoutError::OperationFailed(e) => e,
        }
    }
}

impl From<AuthError> for ServiceError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => ServiceError::Unauthenticated(err.to_string()),
            AuthError::EmailAlreadyExists => ServiceError::Conflict(err.to_string()),
            AuthError::Validation(msg) => ServiceError::BadRequest(msg),
            AuthError::Database(_) | AuthError::Internal(_) => ServiceError::internal(err),
        }
    }
}

impl From<AuthError> for tonic::Status {
    fn from(err: AuthError) -> Self {
        ServiceError::from(err).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tonic::Code;

    #[test]
    fn test_status_mapping() {
        assert_eq!(tonic::Status::from(AuthError::InvalidCredentials).code(), Code::Unauthenticated);
        assert_eq!(tonic::Status::from(AuthError::EmailAlreadyExists).code(), Code::AlreadyExists);
        assert_eq!(
            tonic::Status::from(AuthError::Validation("email is required".into())).code(),
            Code::InvalidArgument
        );

        let status = tonic::Status::from(AuthError::Database("relation users does not exist".into()));
        assert_eq!(status.code(), Code::Internal);
        assert!(!status.message().contains("relation"));
    }
}
