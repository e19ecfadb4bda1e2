//! Request capability.

use axum::http::{request::Parts, HeaderMap};

use crate::routing::Method;

/// Read-only view of an incoming request.
pub trait ServerRequest: Send + Sync {
    fn method(&self) -> Method;

    /// Path component of the request target, without the query string.
    fn path(&self) -> &str;

    fn headers(&self) -> &HeaderMap;
}

/// Request data captured from an axum request before dispatch.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    method: Method,
    path: String,
    headers: HeaderMap,
}

impl HttpRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: HeaderMap::new(),
        }
    }

    /// Capture the routing-relevant parts of a request. The body is not read.
    pub fn from_parts(method: Method, parts: &Parts) -> Self {
        Self {
            method,
            path: parts.uri.path().to_string(),
            headers: parts.headers.clone(),
        }
    }

    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Value of the `x-request-id` header, if present and valid UTF-8.
    pub fn request_id(&self) -> Option<&str> {
        self.headers.get("x-request-id").and_then(|v| v.to_str().ok())
    }
}

impl ServerRequest for HttpRequest {
    fn method(&self) -> Method {
        self.method
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}
