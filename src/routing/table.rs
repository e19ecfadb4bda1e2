//! Route table: built once during setup, read-only while serving.
//!
//! # Responsibilities
//! - Store exact routes keyed by method and literal path
//! - Store pattern routes per method in registration order
//! - Hold the fallback handler
//! - Resolve a (method, path) pair to a handler and its parameters
//!
//! # Design Decisions
//! - Two phases: `RouteTableBuilder` is mutable, `RouteTable` is frozen and
//!   shared via `Arc` without locks
//! - O(1) exact lookup via HashMap
//! - O(n) pattern scan per method; the first registered match wins, so
//!   overlapping patterns are ordered by registration, never by specificity
//! - Exact routes always beat pattern routes

use std::collections::HashMap;
use std::sync::Arc;

use axum::http::StatusCode;

use crate::handler::{Params, RequestContext, SharedHandler};
use crate::routing::method::Method;
use crate::routing::pattern::{is_pattern, Pattern};

/// A pattern route and its handler.
#[derive(Clone)]
pub struct PatternRoute {
    pub pattern: Pattern,
    pub handler: SharedHandler,
}

/// Which stage of resolution produced the handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind<'a> {
    Exact,
    /// Carries the winning pattern spec.
    Pattern(&'a str),
    Fallback,
}

/// Outcome of resolving a request against the table.
pub struct Resolution<'a> {
    pub handler: &'a SharedHandler,
    pub params: Params,
    pub kind: MatchKind<'a>,
}

/// Default fallback: 404 with no body.
fn not_found(ctx: RequestContext) {
    ctx.response.set_status_code(StatusCode::NOT_FOUND).end();
}

/// Mutable route table used while registering routes.
pub struct RouteTableBuilder {
    exact: HashMap<Method, HashMap<String, SharedHandler>>,
    patterns: HashMap<Method, Vec<PatternRoute>>,
    fallback: SharedHandler,
}

impl RouteTableBuilder {
    pub fn new() -> Self {
        Self {
            exact: HashMap::new(),
            patterns: HashMap::new(),
            fallback: Arc::new(not_found),
        }
    }

    /// Register `handler` for `method` and `spec`.
    ///
    /// Specs without `:` or `*` are exact routes; registering the same one
    /// twice replaces the handler. Anything else is a pattern route appended
    /// after the existing patterns for `method`, except that an identical
    /// spec replaces the earlier handler in its original position.
    pub fn register(&mut self, method: Method, spec: &str, handler: SharedHandler) {
        if !is_pattern(spec) {
            let previous = self
                .exact
                .entry(method)
                .or_default()
                .insert(spec.to_string(), handler);
            if previous.is_some() {
                tracing::debug!(%method, path = spec, "Exact route replaced");
            }
            return;
        }

        let routes = self.patterns.entry(method).or_default();
        if let Some(existing) = routes.iter_mut().find(|r| r.pattern.as_str() == spec) {
            tracing::debug!(%method, pattern = spec, "Pattern route replaced");
            existing.handler = handler;
        } else {
            routes.push(PatternRoute {
                pattern: Pattern::parse(spec),
                handler,
            });
        }
    }

    /// Replace the fallback handler. Last call wins.
    pub fn set_fallback(&mut self, handler: SharedHandler) {
        self.fallback = handler;
    }

    /// Number of registered routes, exact and pattern.
    pub fn len(&self) -> usize {
        self.exact.values().map(HashMap::len).sum::<usize>()
            + self.patterns.values().map(Vec::len).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Freeze the table for serving.
    pub fn build(self) -> RouteTable {
        let table = RouteTable {
            exact: self.exact,
            patterns: self.patterns,
            fallback: self.fallback,
        };
        tracing::debug!(
            exact_routes = table.exact.values().map(HashMap::len).sum::<usize>(),
            pattern_routes = table.patterns.values().map(Vec::len).sum::<usize>(),
            "Route table frozen"
        );
        table
    }
}

impl Default for RouteTableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Immutable route table.
pub struct RouteTable {
    exact: HashMap<Method, HashMap<String, SharedHandler>>,
    patterns: HashMap<Method, Vec<PatternRoute>>,
    fallback: SharedHandler,
}

impl RouteTable {
    pub fn builder() -> RouteTableBuilder {
        RouteTableBuilder::new()
    }

    pub fn lookup_exact(&self, method: Method, path: &str) -> Option<&SharedHandler> {
        self.exact.get(&method)?.get(path)
    }

    /// Pattern routes for `method`, in registration order.
    pub fn patterns(&self, method: Method) -> impl Iterator<Item = &PatternRoute> {
        self.patterns.get(&method).into_iter().flatten()
    }

    pub fn fallback(&self) -> &SharedHandler {
        &self.fallback
    }

    /// Resolve a request: exact route, then the first matching pattern, then
    /// the fallback.
    pub fn resolve(&self, method: Method, path: &str) -> Resolution<'_> {
        if let Some(handler) = self.lookup_exact(method, path) {
            return Resolution {
                handler,
                params: Params::new(),
                kind: MatchKind::Exact,
            };
        }

        for route in self.patterns(method) {
            if let Some(params) = route.pattern.matches(path) {
                return Resolution {
                    handler: &route.handler,
                    params,
                    kind: MatchKind::Pattern(route.pattern.as_str()),
                };
            }
        }

        Resolution {
            handler: &self.fallback,
            params: Params::new(),
            kind: MatchKind::Fallback,
        }
    }
}
