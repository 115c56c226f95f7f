use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    Error, HttpMessage,
};
use crypto_core::{verify_credential, Claims, JwtManager};
use error_types::ServiceError;
use futures::future::{ready, Ready};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::sync::Arc;

/// Paths that never require a credential
pub const DEFAULT_EXEMPT_PATHS: &[&str] = &["/register", "/login", "/health"];

/// Verified claims of the caller, extracted from request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Claims);

/// JWT Authentication Middleware
///
/// Exempt paths pass through untouched. Everything else must carry a valid
/// `Authorization` value or is answered with `401 {"error": ...}` without
/// reaching the handler.
#[derive(Clone)]
pub struct JwtAuthMiddleware {
    manager: Arc<JwtManager>,
    exempt: Arc<Vec<String>>,
}

impl JwtAuthMiddleware {
    pub fn new(manager: Arc<JwtManager>) -> Self {
        Self::with_exempt_paths(manager, DEFAULT_EXEMPT_PATHS)
    }

    pub fn with_exempt_paths(manager: Arc<JwtManager>, paths: &[&str]) -> Self {
        Self {
            manager,
            exempt: Arc::new(paths.iter().map(|p| p.to_string()).collect()),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = JwtAuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddlewareService {
            service: Rc::new(service),
            manager: self.manager.clone(),
            exempt: self.exempt.clone(),
        }))
    }
}

pub struct JwtAuthMiddlewareService<S> {
    service: Rc<S>,
    manager: Arc<JwtManager>,
    exempt: Arc<Vec<String>>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        if self.exempt.iter().any(|p| p == req.path()) {
            return Box::pin(async move { Ok(service.call(req).await?.map_into_left_body()) });
        }

        // HeaderMap lookups are case-insensitive
        let header = req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .map(str::to_owned);
        let verified = verify_credential(&self.manager, header.as_deref());

        Box::pin(async move {
            match verified {
                Ok(claims) => {
                    tracing::debug!(user_id = %claims.user_id, path = %req.path(), "Request authenticated");
                    req.extensions_mut().insert(claims);
                    Ok(service.call(req).await?.map_into_left_body())
                }
                Err(e) => {
                    tracing::warn!(error = %e, path = %req.path(), "Rejected unauthenticated request");
                    let rejection = ServiceError::Unauthenticated(e.to_string());
                    Ok(req.error_response(rejection).map_into_right_body())
                }
            }
        })
    }
}

/// FromRequest implementation for AuthenticatedUser
impl actix_web::FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(
        req: &actix_web::HttpRequest,
        _payload: &mut actix_web::dev::Payload,
    ) -> Self::Future {
        match req.extensions().get::<Claims>() {
            Some(claims) => ready(Ok(AuthenticatedUser(claims.clone()))),
            None => ready(Err(ServiceError::Unauthenticated(
                "User not authenticated".to_string(),
            )
            .into())),
        }
    }
}
