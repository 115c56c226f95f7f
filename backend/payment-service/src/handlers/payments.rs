/// HTTP handlers for the `/payments` resource
use crate::models::{CreatePaymentBody, PaymentView, UpdatePaymentBody};
use crate::services::PaymentApp;
use actix_middleware::AuthenticatedUser;
use actix_web::{web, HttpResponse};
use error_types::ServiceError;

pub async fn create_payment(
    app: web::Data<PaymentApp>,
    user: AuthenticatedUser,
    body: web::Json<CreatePaymentBody>,
) -> Result<HttpResponse, ServiceError> {
    let payment = app.create(&body.email, body.amount).await?;
    tracing::debug!(user_id = %user.0.user_id, payment_id = %payment.id, "Payment recorded");

    Ok(HttpResponse::Created().json(PaymentView::from(payment)))
}

pub async fn list_payments(app: web::Data<PaymentApp>) -> Result<HttpResponse, ServiceError> {
    let payments: Vec<PaymentView> = app.list().await?.into_iter().map(PaymentView::from).collect();
    Ok(HttpResponse::Ok().json(payments))
}

pub async fn get_payment(
    app: web::Data<PaymentApp>,
    id: web::Path<String>,
) -> Result<HttpResponse, ServiceError> {
    let payment = app.get(&id).await?;
    Ok(HttpResponse::Ok().json(PaymentView::from(payment)))
}

pub async fn update_payment(
    app: web::Data<PaymentApp>,
    id: web::Path<String>,
    body: web::Json<UpdatePaymentBody>,
) -> Result<HttpResponse, ServiceError> {
    let payment = app.update_status(&id, &body.status).await?;
    Ok(HttpResponse::Ok().json(PaymentView::from(payment)))
}

pub async fn delete_payment(
    app: web::Data<PaymentApp>,
    id: web::Path<String>,
) -> Result<HttpResponse, ServiceError> {
    app.delete(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}
