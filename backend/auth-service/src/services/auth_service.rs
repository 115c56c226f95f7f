/// Registration and login, shared by the REST and gRPC front doors
use crate::db::UserRepository;
use crate::error::{AuthError, AuthResult};
use crate::models::{user::NewUser, Credentials, Registration, User};
use crate::security::{hash_password, verify_password};
use crypto_core::JwtManager;
use resilience::with_timeout_result;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use validator::Validate;

#[derive(Clone)]
pub struct AuthApp {
    users: Arc<dyn UserRepository>,
    jwt: Arc<JwtManager>,
    store_timeout: Duration,
}

impl AuthApp {
    pub fn new(users: Arc<dyn UserRepository>, jwt: Arc<JwtManager>, store_timeout: Duration) -> Self {
        Self {
            users,
            jwt,
            store_timeout,
        }
    }

    pub async fn register(&self, name: &str, email: &str, password: &str) -> AuthResult<User> {
        let input = Registration {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        input.validate()?;

        let password_hash = hash_password(&input.password)?;
        let user = with_timeout_result(
            self.store_timeout,
            self.users.create(NewUser {
                name: input.name,
                email: input.email,
                password_hash,
            }),
        )
        .await?;

        info!(event = "user_registered", user_id = %user.id);
        Ok(user)
    }

    /// Check credentials and mint a 24h token
    ///
    /// Unknown email and wrong password are indistinguishable to the caller.
    pub async fn login(&self, email: &str, password: &str) -> AuthResult<String> {
        Credentials {
            email: email.to_string(),
            password: password.to_string(),
        }
        .validate()?;

        let user = with_timeout_result(self.store_timeout, self.users.find_by_email(email))
            .await?
            .ok_or_else(|| {
                warn!(event = "login_failed_user_not_found");
                AuthError::InvalidCredentials
            })?;

        verify_password(password, &user.password_hash).map_err(|e| {
            warn!(event = "login_failed_wrong_password", user_id = %user.id);
            e
        })?;

        let token = self
            .jwt
            .issue(&user.id.to_string(), &user.email)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        info!(event = "user_login_success", user_id = %user.id);
        Ok(token)
    }
}
