//! Client-side JWT Interceptor
//!
//! Re-attaches the caller's credential to outbound gRPC requests.

use crate::AUTHORIZATION_KEY;
use tonic::metadata::AsciiMetadataValue;
use tonic::service::Interceptor;
use tonic::{Request, Status};

/// Client-side interceptor that injects an `authorization` value
///
/// The value is forwarded verbatim: the gateway has already validated it and
/// the downstream interceptor applies the same parsing rules.
#[derive(Clone, Debug)]
pub struct JwtClientInterceptor {
    auth_header: AsciiMetadataValue,
}

impl JwtClientInterceptor {
    /// Build from a raw `Authorization` header value
    ///
    /// ## Errors
    ///
    /// `Status::unauthenticated` if the value is not valid ASCII metadata.
    /// Metadata parsing alone would accept obs-text bytes, so non-ASCII is
    /// rejected first.
    pub fn from_authorization(value: &str) -> Result<Self, Status> {
        if !value.is_ascii() {
            return Err(Status::unauthenticated("invalid authorization"));
        }

        let auth_header = value
            .parse::<AsciiMetadataValue>()
            .map_err(|_| Status::unauthenticated("invalid authorization"))?;

        Ok(Self { auth_header })
    }
}

impl Interceptor for JwtClientInterceptor {
    fn call(&mut self, mut request: Request<()>) -> Result<Request<()>, Status> {
        request
            .metadata_mut()
            .insert(AUTHORIZATION_KEY, self.auth_header.clone());

        Ok(request)
    }
}
