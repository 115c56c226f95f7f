use crate::models::{CreateTransactionBody, TransactionView, UpdateTransactionBody};
use crate::services::TransactionApp;
use actix_web::{http::header::AUTHORIZATION, web, HttpRequest, HttpResponse};
use error_types::ServiceError;

/// Record a purchase after product and payment checks pass
pub async fn create_transaction(
    req: HttpRequest,
    app: web::Data<TransactionApp>,
    body: web::Json<CreateTransactionBody>,
) -> Result<HttpResponse, ServiceError> {
    let authorization = req.headers().get(AUTHORIZATION).and_then(|v| v.to_str().ok());
    let transaction = app.create(body.into_inner(), authorization).await?;

    Ok(HttpResponse::Created().json(TransactionView::from(transaction)))
}

pub async fn list_transactions(app: web::Data<TransactionApp>) -> Result<HttpResponse, ServiceError> {
    let views: Vec<TransactionView> = app.list().await?.into_iter().map(TransactionView::from).collect();
    Ok(HttpResponse::Ok().json(views))
}

pub async fn get_transaction(
    app: web::Data<TransactionApp>,
    id: web::Path<String>,
) -> Result<HttpResponse, ServiceError> {
    let transaction = app.get(&id).await?;
    Ok(HttpResponse::Ok().json(TransactionView::from(transaction)))
}

pub async fn update_transaction(
    app: web::Data<TransactionApp>,
    id: web::Path<String>,
    body: web::Json<UpdateTransactionBody>,
) -> Result<HttpResponse, ServiceError> {
    let transaction = app.update_status(&id, &body.status).await?;
    Ok(HttpResponse::Ok().json(TransactionView::from(transaction)))
}

pub async fn delete_transaction(
    app: web::Data<TransactionApp>,
    id: web::Path<String>,
) -> Result<HttpResponse, ServiceError> {
    app.delete(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}
