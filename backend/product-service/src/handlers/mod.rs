//! HTTP handlers for `/products`

pub mod products;

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
            web::resource("/products")
                .route(web::get().to(products::list_products))
                .route(web::post().to(products::create_product)),
        )
        .service(
            web::resource("/products/{id}")
                .route(web::get().to(products::get_product))
                .route(web::put().to(products::update_product))
                .route(web::delete().to(products::delete_product)),
        );
}
