//! Server-side JWT Interceptor
//!
//! Validates the `authorization` metadata of incoming gRPC requests and
//! stores the resulting claims in request extensions.

use crate::AUTHORIZATION_KEY;
use crypto_core::{verify_credential, AuthError, JwtManager};
use std::sync::Arc;
use tonic::metadata::{KeyAndValueRef, MetadataMap};
use tonic::service::Interceptor;
use tonic::{Request, Status};
use tracing::warn;

/// Server-side interceptor that validates JWT tokens and extracts claims
///
/// ## Design
///
/// - **Fail-fast**: any credential problem returns `Status::unauthenticated`
/// - **Same policy as REST**: header parsing lives in `crypto_core::verify_credential`
/// - **Token never logged**: only the failure reason reaches the log
///
/// ## Usage
///
/// ```rust,no_run
/// use grpc_jwt_propagation::JwtServerInterceptor;
/// use crypto_core::JwtManager;
/// use std::sync::Arc;
///
/// # fn example() -> Result<(), crypto_core::JwtError> {
/// let manager = Arc::new(JwtManager::new("secret")?);
/// let interceptor = JwtServerInterceptor::new(manager);
/// // let service = PaymentServiceServer::with_interceptor(svc, interceptor);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct JwtServerInterceptor {
    manager: Arc<JwtManager>,
}

impl JwtServerInterceptor {
    pub fn new(manager: Arc<JwtManager>) -> Self {
        Self { manager }
    }

    fn authenticate(&self, metadata: &MetadataMap) -> Result<crypto_core::Claims, Status> {
        let header = authorization_value(metadata);

        verify_credential(&self.manager, header).map_err(|e: AuthError| {
            warn!(error = %e, "Rejected gRPC request");
            Status::unauthenticated(e.to_string())
        })
    }
}

/// Find the authorization value regardless of how the peer cased the key
///
/// Metadata keys are normalized to lowercase on the wire, so the direct lookup
/// covers conforming peers; the scan is for maps built by hand.
fn authorization_value(metadata: &MetadataMap) -> Option<&str> {
    if let Some(value) = metadata.get(AUTHORIZATION_KEY) {
        return value.to_str().ok();
    }

    metadata.iter().find_map(|entry| match entry {
        KeyAndValueRef::Ascii(key, value) if key.as_str().eq_ignore_ascii_case(AUTHORIZATION_KEY) => {
            value.to_str().ok()
        }
        _ => None,
    })
}

impl Interceptor for JwtServerInterceptor {
    fn call(&mut self, mut request: Request<()>) -> Result<Request<()>, Status> {
        let claims = self.authenticate(request.metadata())?;
        request.extensions_mut().insert(claims);
        Ok(request)
    }
}
