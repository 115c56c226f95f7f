use crate::models::{ProductInput, ProductView};
use crate::services::ProductApp;
use actix_web::{web, HttpResponse};
use error_types::ServiceError;

pub async fn create_product(
    app: web::Data<ProductApp>,
    body: web::Json<ProductInput>,
) -> Result<HttpResponse, ServiceError> {
    let product = app.create(body.into_inner()).await?;
    Ok(HttpResponse::Created().json(ProductView::from(product)))
}

pub async fn list_products(app: web::Data<ProductApp>) -> Result<HttpResponse, ServiceError> {
    let products: Vec<ProductView> = app.list().await?.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(products))
}

pub async fn get_product(
    app: web::Data<ProductApp>,
    id: web::Path<String>,
) -> Result<HttpResponse, ServiceError> {
    Ok(HttpResponse::Ok().json(ProductView::from(app.get(&id).await?)))
}

pub async fn update_product(
    app: web::Data<ProductApp>,
    id: web::Path<String>,
    body: web::Json<ProductInput>,
) -> Result<HttpResponse, ServiceError> {
    let product = app.update(&id, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ProductView::from(product)))
}

pub async fn delete_product(
    app: web::Data<ProductApp>,
    id: web::Path<String>,
) -> Result<HttpResponse, ServiceError> {
    app.delete(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}
