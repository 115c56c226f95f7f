#![allow(dead_code)]

use async_trait::async_trait;
use auth_service::db::UserRepository;
use auth_service::models::user::NewUser;
use auth_service::{AuthApp, AuthError, AuthResult, User};
use chrono::Utc;
use crypto_core::JwtManager;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use uuid::Uuid;

pub const SECRET: &str = "auth-service-test-secret";

/// In-memory stand-in for the users table
#[derive(Default)]
pub struct InMemoryUsers {
    rows: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn find_by_email(&self, email: &str) -> AuthResult<Option<User>> {
        Ok(self.rows.lock().unwrap().iter().find(|u| u.email == email).cloned())
    }

    async fn create(&self, user: NewUser) -> AuthResult<User> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|u| u.email == user.email) {
            return Err(AuthError::EmailAlreadyExists);
        }
        let now = Utc::now();
        let created = User {
            id: Uuid::new_v4(),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            created_at: now,
            updated_at: now,
        };
        rows.push(created.clone());
        Ok(created)
    }
}

pub fn jwt() -> Arc<JwtManager> {
    Arc::new(JwtManager::new(SECRET).unwrap())
}

pub fn app(jwt: Arc<JwtManager>) -> AuthApp {
    AuthApp::new(Arc::new(InMemoryUsers::default()), jwt, Duration::from_secs(1))
}
