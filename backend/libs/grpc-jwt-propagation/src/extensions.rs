//! Request extension trait for reading validated claims

use crypto_core::Claims;
use tonic::{Request, Status};

pub trait JwtClaimsExt {
    /// Claims stored by [`crate::JwtServerInterceptor`]
    ///
    /// Returns `Status::unauthenticated` when the service was mounted without
    /// the interceptor, which is a wiring bug rather than a client error.
    fn jwt_claims(&self) -> Result<&Claims, Status>;
}

impl<T> JwtClaimsExt for Request<T> {
    fn jwt_claims(&self) -> Result<&Claims, Status> {
        self.extensions()
            .get::<Claims>()
            .ok_or_else(|| Status::unauthenticated("Missing Authorization header"))
    }
}
