pub mod transactions;

use actix_web::{web, HttpResponse};
use error_types::ServiceError;

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({"status": "ok"}))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    let json = web::JsonConfig::default().error_handler(|err, _req| {
        ServiceError::BadRequest(format!("Invalid request body: {}", err)).into()
    });

    cfg.app_data(json)
        .route("/health", web::get().to(health))
        .service(
            web::scope("/transactions")
                .route("", web::get().to(transactions::list_transactions))
                .route("", web::post().to(transactions::create_transaction))
                .route("/{id}", web::get().to(transactions::get_transaction))
                .route("/{id}", web::put().to(transactions::update_transaction))
                .route("/{id}", web::delete().to(transactions::delete_transaction)),
        );
}
