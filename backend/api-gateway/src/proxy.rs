//! REST passthrough
//!
//! Replays the inbound request against a backend with the same method,
//! headers and body, then relays whatever the backend answered. The gateway
//! never reinterprets a backend's status or body.

use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse};
use error_types::ServiceError;
use std::time::Duration;

/// Headers owned by the transport on each hop; the body is buffered and
/// re-framed by the client, so its framing headers never carry over
const REQUEST_SKIP: &[&str] = &["host", "content-length", "transfer-encoding", "connection"];
const RESPONSE_SKIP: &[&str] = &["content-length", "transfer-encoding", "connection"];

const CONNECT_FAILED: &str = "Failed to connect to downstream service";

#[derive(Debug, Clone)]
pub struct RestForwarder {
    client: reqwest::Client,
}

impl RestForwarder {
    /// `timeout` bounds the whole exchange with a backend
    ///
    /// Redirects are never followed: a backend `3xx` is the response.
    pub fn new(timeout: Duration) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self { client })
    }

    /// Forward `req` to `{base_url}{path}?{query}`
    ///
    /// `path` is the already prefix-stripped request path. Any transport
    /// failure, including a timeout, answers `502`.
    pub async fn forward(
        &self,
        req: &HttpRequest,
        body: web::Bytes,
        base_url: &str,
        path: &str,
    ) -> Result<HttpResponse, ServiceError> {
        let url = target_url(base_url, path, req.query_string());

        let method = reqwest::Method::from_bytes(req.method().as_str().as_bytes())
            .map_err(|_| ServiceError::BadRequest(format!("Unsupported method: {}", req.method())))?;

        let mut outbound = self.client.request(method, &url);
        for (name, value) in req.headers() {
            if skip_request_header(name.as_str()) {
                continue;
            }
            outbound = outbound.header(name.as_str(), value.as_bytes());
        }
        if !body.is_empty() {
            outbound = outbound.body(body);
        }

        tracing::debug!(method = %req.method(), url = %url, "Forwarding request");

        let upstream = outbound.send().await.map_err(|e| {
            tracing::warn!(url = %url, error = %e, "Downstream request failed");
            ServiceError::BadGateway(CONNECT_FAILED.to_string())
        })?;

        let status = StatusCode::from_u16(upstream.status().as_u16())
            .map_err(|e| ServiceError::BadGateway(format!("Invalid downstream status: {}", e)))?;

        let mut response = HttpResponse::build(status);
        for (name, value) in upstream.headers() {
            if RESPONSE_SKIP.contains(&name.as_str()) {
                continue;
            }
            if let (Ok(name), Ok(value)) = (
                HeaderName::from_bytes(name.as_str().as_bytes()),
                HeaderValue::from_bytes(value.as_bytes()),
            ) {
                response.append_header((name, value));
            }
        }

        let payload = upstream.bytes().await.map_err(|e| {
            tracing::warn!(url = %url, error = %e, "Failed to read downstream response");
            ServiceError::BadGateway(CONNECT_FAILED.to_string())
        })?;

        tracing::debug!(url = %url, status = status.as_u16(), "Relayed downstream response");

        Ok(response.body(payload))
    }
}

fn skip_request_header(name: &str) -> bool {
    REQUEST_SKIP.contains(&name)
}

fn target_url(base_url: &str, path: &str, query: &str) -> String {
    let base = base_url.trim_end_matches('/');
    if query.is_empty() {
        format!("{}{}", base, path)
    } else {
        format!("{}{}?{}", base, path, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hop_by_hop_request_headers_skipped() {
        for name in ["host", "content-length", "transfer-encoding", "connection"] {
            assert!(skip_request_header(name), "{} should not be forwarded", name);
        }
        assert!(!skip_request_header("authorization"));
        assert!(!skip_request_header("content-type"));
    }

    #[test]
    fn test_target_url() {
        assert_eq!(
            target_url("http://products:8081", "/products/1", ""),
            "http://products:8081/products/1"
        );
        assert_eq!(
            target_url("http://products:8081/", "/products", "page=2&limit=5"),
            "http://products:8081/products?page=2&limit=5"
        );
    }
}
