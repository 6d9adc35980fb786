//! Request handling and transformation.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) for every request
//! - Turn the transport request into a `RouteRequest` for handlers
//! - Parse the query string and the JSON body
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - Query keys are unique; the first occurrence wins
//! - A body that is empty or not JSON becomes `None`, never an error

use std::collections::HashMap;

use axum::http::{HeaderName, HeaderValue, Method, Request};
use chrono::{DateTime, Utc};
use serde_json::Value;
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

use crate::routing::PathParams;

/// Header carrying the request ID in both directions.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Generates UUID v4 request IDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Read the request ID set by the request-id layer.
pub fn request_id<B>(request: &Request<B>) -> &str {
    request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

/// What a route handler sees of a request.
#[derive(Debug, Clone)]
pub struct RouteRequest {
    pub method: Method,
    pub path: String,
    /// Bound by the router once a route matches.
    pub params: PathParams,
    pub query: HashMap<String, String>,
    pub body: Option<Value>,
    pub received_at: DateTime<Utc>,
}

impl RouteRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            params: PathParams::default(),
            query: HashMap::new(),
            body: None,
            received_at: Utc::now(),
        }
    }

    /// Parse a raw query string (without the leading '?').
    pub fn with_query(mut self, raw: Option<&str>) -> Self {
        if let Some(raw) = raw {
            for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
                self.query
                    .entry(key.into_owned())
                    .or_insert_with(|| value.into_owned());
            }
        }
        self
    }

    pub fn with_body(mut self, bytes: &[u8]) -> Self {
        self.body = serde_json::from_slice(bytes).ok();
        self
    }

    pub fn with_json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_received_at(mut self, received_at: DateTime<Utc>) -> Self {
        self.received_at = received_at;
        self
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name)
    }

    pub fn query(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_first_occurrence_wins() {
        let req = RouteRequest::new(Method::GET, "/api/search")
            .with_query(Some("query=thor&query=loki&hero=iron%20man"));
        assert_eq!(req.query("query"), Some("thor"));
        assert_eq!(req.query("hero"), Some("iron man"));
        assert_eq!(req.query("missing"), None);
    }

    #[test]
    fn test_empty_query_value() {
        let req = RouteRequest::new(Method::GET, "/api/search").with_query(Some("query="));
        assert_eq!(req.query("query"), Some(""));
    }

    #[test]
    fn test_body_parsing() {
        let req = RouteRequest::new(Method::POST, "/api/profile").with_body(br#"{"x":1}"#);
        assert_eq!(req.body, Some(json!({ "x": 1 })));

        let req = RouteRequest::new(Method::POST, "/api/profile").with_body(b"not json");
        assert_eq!(req.body, None);

        let req = RouteRequest::new(Method::POST, "/api/profile").with_body(b"");
        assert_eq!(req.body, None);
    }

    #[test]
    fn test_request_ids_are_unique() {
        let req = Request::builder().uri("/").body(()).unwrap();
        let mut make = MakeRequestUuid;
        let a = make.make_request_id(&req).unwrap();
        let b = make.make_request_id(&req).unwrap();
        assert_ne!(a.header_value(), b.header_value());
        assert_eq!(a.header_value().len(), 36);
    }

    #[test]
    fn test_request_id_fallback() {
        let req = Request::builder().uri("/").body(()).unwrap();
        assert_eq!(request_id(&req), "unknown");

        let req = Request::builder()
            .uri("/")
            .header("x-request-id", "abc")
            .body(())
            .unwrap();
        assert_eq!(request_id(&req), "abc");
    }
}
