//! Static route table
//!
//! Each descriptor binds a method matcher and a path pattern to exactly one
//! dispatch policy. The table is built once at startup and matched top to
//! bottom; the first hit wins.
//!
//! | Method | Path                        | Policy                 |
//! |--------|-----------------------------|------------------------|
//! | POST   | /register, /login           | Auth RPC               |
//! | POST   | /payments-grpc              | Payment RPC Create     |
//! | GET    | /payments-grpc              | Payment RPC List       |
//! | GET    | /payments-grpc/{id}         | Payment RPC Get        |
//! | PUT    | /payments-grpc/{id}         | Payment RPC Update     |
//! | DELETE | /payments-grpc/{id}         | Payment RPC Delete     |
//! | any    | /products, /products/..     | REST forward           |
//! | any    | /transactions, /transactions/.. | REST forward       |
//! | any    | /payments, /payments/..     | REST forward           |
//!
//! A leading `/api` segment is stripped before matching, so `/api/products/1`
//! and `/products/1` are the same route.

use crate::config::UpstreamConfig;
use actix_web::http::Method;

const API_PREFIX: &str = "/api";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentOp {
    Create,
    List,
    Get,
    Update,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthOp {
    Register,
    Login,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Policy {
    /// Reverse-proxy verbatim to `base_url`
    RestForward { base_url: String },
    /// Translate JSON into a `PaymentService` call
    PaymentRpc(PaymentOp),
    /// Translate JSON into an `AuthService` call
    AuthRpc(AuthOp),
}

#[derive(Debug, Clone, Copy)]
enum PathPattern {
    /// The path exactly
    Exact(&'static str),
    /// `{base}/{id}` with a single non-empty segment
    WithId(&'static str),
    /// The base itself or anything below it (`{base}/...`)
    Prefix(&'static str),
}

impl PathPattern {
    /// Returns the captured id for `WithId`, `Some(None)` for other matches
    fn matches(&self, path: &str) -> Option<Option<String>> {
        match *self {
            PathPattern::Exact(p) => (path == p).then_some(None),
            PathPattern::WithId(base) => {
                let id = path.strip_prefix(base)?.strip_prefix('/')?;
                (!id.is_empty() && !id.contains('/')).then(|| Some(id.to_string()))
            }
            PathPattern::Prefix(base) => {
                let rest = path.strip_prefix(base)?;
                (rest.is_empty() || rest.starts_with('/')).then_some(None)
            }
        }
    }
}

#[derive(Debug, Clone)]
struct RouteDescriptor {
    /// `None` matches any method
    method: Option<Method>,
    pattern: PathPattern,
    policy: Policy,
}

impl RouteDescriptor {
    fn new(method: Option<Method>, pattern: PathPattern, policy: Policy) -> Self {
        Self {
            method,
            pattern,
            policy,
        }
    }
}

/// A resolved request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch<'a> {
    pub policy: &'a Policy,
    /// Request path with the gateway prefix removed
    pub path: String,
    /// `{id}` segment for single-record RPC routes
    pub id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<RouteDescriptor>,
}

/// Drop a leading `/api` segment, if any
pub fn strip_api_prefix(path: &str) -> &str {
    match path.strip_prefix(API_PREFIX) {
        Some("") => "/",
        Some(rest) if rest.starts_with('/') => rest,
        _ => path,
    }
}

impl RouteTable {
    pub fn new(upstreams: &UpstreamConfig) -> Self {
        use PathPattern::*;

        let forward = |url: &str| Policy::RestForward {
            base_url: url.trim_end_matches('/').to_string(),
        };

        let routes = vec![
            RouteDescriptor::new(Some(Method::POST), Exact("/register"), Policy::AuthRpc(AuthOp::Register)),
            RouteDescriptor::new(Some(Method::POST), Exact("/login"), Policy::AuthRpc(AuthOp::Login)),
            // before /payments, which would otherwise claim it as a prefix
            RouteDescriptor::new(Some(Method::POST), Exact("/payments-grpc"), Policy::PaymentRpc(PaymentOp::Create)),
            RouteDescriptor::new(Some(Method::GET), Exact("/payments-grpc"), Policy::PaymentRpc(PaymentOp::List)),
            RouteDescriptor::new(Some(Method::GET), WithId("/payments-grpc"), Policy::PaymentRpc(PaymentOp::Get)),
            RouteDescriptor::new(Some(Method::PUT), WithId("/payments-grpc"), Policy::PaymentRpc(PaymentOp::Update)),
            RouteDescriptor::new(Some(Method::DELETE), WithId("/payments-grpc"), Policy::PaymentRpc(PaymentOp::Delete)),
            RouteDescriptor::new(None, Prefix("/products"), forward(&upstreams.product_url)),
            RouteDescriptor::new(None, Prefix("/transactions"), forward(&upstreams.transaction_url)),
            RouteDescriptor::new(None, Prefix("/payments"), forward(&upstreams.payment_url)),
        ];

        Self { routes }
    }

    pub fn resolve(&self, method: &Method, path: &str) -> Option<RouteMatch<'_>> {
        let path = strip_api_prefix(path);

        self.routes.iter().find_map(|route| {
            if route.method.as_ref().is_some_and(|m| m != method) {
                return None;
            }
            let id = route.pattern.matches(path)?;
            Some(RouteMatch {
                policy: &route.policy,
                path: path.to_string(),
                id,
            })
        })
    }
}
