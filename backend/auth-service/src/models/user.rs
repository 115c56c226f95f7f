use chrono::{DateTime, Utc};
/// User model
use sqlx::FromRow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// A registered principal
///
/// Deliberately not `Serialize`: the password hash must never leave the service.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[sqlx(rename = "password")]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields needed to insert a new user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Register request as accepted from either front door
#[derive(Debug, Clone, Validate)]
pub struct Registration {
    #[validate(custom(function = "not_blank", message = "name is required"))]
    pub name: String,
    #[validate(
        custom(function = "not_blank", message = "email is required"),
        email(message = "email is invalid")
    )]
    pub email: String,
    #[validate(custom(function = "not_blank", message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Validate)]
pub struct Credentials {
    #[validate(custom(function = "not_blank", message = "email is required"))]
    pub email: String,
    #[validate(custom(function = "not_blank", message = "password is required"))]
    pub password: String,
}
