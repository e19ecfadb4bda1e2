//! Per-request context handed to handlers.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::http::{ServerRequest, ServerResponse};

/// Parameters captured from the request path.
///
/// `:name` segments bind under `name`; a `*` segment binds under `rest`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(HashMap<String, String>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// A later capture with the same name replaces the earlier one.
    pub(crate) fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }
}

/// Routing information derived from the request.
#[derive(Debug, Clone, Default)]
pub struct RouteInfo {
    /// Request path as seen by the router (no query string).
    pub path: String,
    /// Empty unless a pattern route matched.
    pub params: Params,
}

/// Everything a handler can see: the request, the routing extras, and the
/// response it may finalize on its own.
///
/// Built fresh for every request and never shared across requests.
#[derive(Clone)]
pub struct RequestContext {
    pub request: Arc<dyn ServerRequest>,
    pub extra: RouteInfo,
    pub response: Arc<dyn ServerResponse>,
}

impl RequestContext {
    pub fn new(
        request: Arc<dyn ServerRequest>,
        extra: RouteInfo,
        response: Arc<dyn ServerResponse>,
    ) -> Self {
        Self {
            request,
            extra,
            response,
        }
    }

    /// Shorthand for `ctx.extra.params.get(name)`.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.extra.params.get(name)
    }

    pub fn path(&self) -> &str {
        &self.extra.path
    }
}

impl fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestContext")
            .field("method", &self.request.method())
            .field("extra", &self.extra)
            .field("response_ended", &self.response.is_ended())
            .finish()
    }
}
