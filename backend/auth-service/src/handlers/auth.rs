/// REST mirror of the gRPC `AuthService`
use crate::services::AuthApp;
use actix_web::{web, HttpResponse};
use error_types::ServiceError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct RegisterBody {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginBody {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterReply {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginReply {
    pub email: String,
    pub token: String,
}

pub async fn register(
    app: web::Data<AuthApp>,
    body: web::Json<RegisterBody>,
) -> Result<HttpResponse, ServiceError> {
    let user = app.register(&body.name, &body.email, &body.password).await?;

    Ok(HttpResponse::Created().json(RegisterReply {
        id: user.id.to_string(),
        name: user.name,
        email: user.email,
    }))
}

pub async fn login(
    app: web::Data<AuthApp>,
    body: web::Json<LoginBody>,
) -> Result<HttpResponse, ServiceError> {
    let body = body.into_inner();
    let token = app.login(&body.email, &body.password).await?;

    Ok(HttpResponse::Ok().json(LoginReply {
        email: body.email,
        token,
    }))
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({"status": "ok"}))
}

/// Malformed JSON answers with the shared `{error}` body instead of plain text
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        ServiceError::BadRequest(format!("Invalid request body: {}", err)).into()
    })
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/register", web::post().to(register))
        .route("/login", web::post().to(login))
        .route("/health", web::get().to(health));
}
