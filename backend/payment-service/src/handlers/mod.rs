pub mod payments;

use actix_web::{web, HttpResponse};
use error_types::ServiceError;

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
        .route("/health", web::get().to(health))
        .service(
            web::scope("/payments")
                .route("", web::get().to(payments::list_payments))
                .route("", web::post().to(payments::create_payment))
                .route("/{id}", web::get().to(payments::get_payment))
                .route("/{id}", web::put().to(payments::update_payment))
                .route("/{id}", web::delete().to(payments::delete_payment)),
        );
}
