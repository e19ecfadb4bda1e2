//! Fluent route registration and server startup.
//!
//! ```no_run
//! use waypost::{Reply, Router};
//!
//! # async fn run() -> Result<(), waypost::ServerError> {
//! let server = Router::new()
//!     .get("/", |_| "hi")
//!     .get("/h/:name", |ctx| format!("Hi {}", ctx.param("name").unwrap_or_default()))
//!     .get("/slow", |_| Reply::pending(async { "eventually" }))
//!     .fallback(|_| "Not found")
//!     .listen(3000)
//!     .await?;
//! server.wait().await
//! # }
//! ```
//!
//! Routes can only be added before `listen`: it consumes the router and
//! freezes the table.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::handler::{Handler, IntoReply, RequestContext};
use crate::http::{HttpServer, Server, ServerError, ServerHandle};
use crate::routing::{Dispatcher, Method, RouteTableBuilder};

/// Route registration builder.
pub struct Router {
    routes: RouteTableBuilder,
    config: ServerConfig,
}

impl Router {
    pub fn new() -> Self {
        Self::with_config(ServerConfig::default())
    }

    /// Use `config` for the server started by [`listen`](Self::listen).
    pub fn with_config(config: ServerConfig) -> Self {
        Self {
            routes: RouteTableBuilder::new(),
            config,
        }
    }

    /// Register a closure for `method` and `path`.
    ///
    /// `path` is a literal (`/users`) or a pattern with `:name` segments
    /// and/or a trailing `*` (`/users/:id`, `/static/*`). Overlapping patterns
    /// are tried in registration order.
    pub fn route<F, R>(self, method: Method, path: &str, handler: F) -> Self
    where
        F: Fn(RequestContext) -> R + Send + Sync + 'static,
        R: IntoReply,
    {
        self.handle(method, path, handler)
    }

    /// Register any [`Handler`] implementation.
    pub fn handle<H: Handler>(mut self, method: Method, path: &str, handler: H) -> Self {
        self.routes.register(method, path, Arc::new(handler));
        self
    }

    pub fn get<F, R>(self, path: &str, handler: F) -> Self
    where
        F: Fn(RequestContext) -> R + Send + Sync + 'static,
        R: IntoReply,
    {
        self.route(Method::Get, path, handler)
    }

    pub fn post<F, R>(self, path: &str, handler: F) -> Self
    where
        F: Fn(RequestContext) -> R + Send + Sync + 'static,
        R: IntoReply,
    {
        self.route(Method::Post, path, handler)
    }

    pub fn put<F, R>(self, path: &str, handler: F) -> Self
    where
        F: Fn(RequestContext) -> R + Send + Sync + 'static,
        R: IntoReply,
    {
        self.route(Method::Put, path, handler)
    }

    pub fn patch<F, R>(self, path: &str, handler: F) -> Self
    where
        F: Fn(RequestContext) -> R + Send + Sync + 'static,
        R: IntoReply,
    {
        self.route(Method::Patch, path, handler)
    }

    pub fn delete<F, R>(self, path: &str, handler: F) -> Self
    where
        F: Fn(RequestContext) -> R + Send + Sync + 'static,
        R: IntoReply,
    {
        self.route(Method::Delete, path, handler)
    }

    pub fn options<F, R>(self, path: &str, handler: F) -> Self
    where
        F: Fn(RequestContext) -> R + Send + Sync + 'static,
        R: IntoReply,
    {
        self.route(Method::Options, path, handler)
    }

    pub fn head<F, R>(self, path: &str, handler: F) -> Self
    where
        F: Fn(RequestContext) -> R + Send + Sync + 'static,
        R: IntoReply,
    {
        self.route(Method::Head, path, handler)
    }

    /// Handler for requests no route matches. Replaces the default 404.
    pub fn fallback<F, R>(mut self, handler: F) -> Self
    where
        F: Fn(RequestContext) -> R + Send + Sync + 'static,
        R: IntoReply,
    {
        self.routes.set_fallback(Arc::new(handler));
        self
    }

    /// Freeze the routes into a dispatcher without starting a server.
    pub fn into_dispatcher(self) -> Dispatcher {
        Dispatcher::new(self.routes.build())
    }

    /// Start the built-in axum server on `port`.
    ///
    /// Resolves once the listener is bound; bind failures are returned.
    /// Dropping the returned handle leaves the server running.
    pub async fn listen(self, port: u16) -> Result<ServerHandle, ServerError> {
        let server = HttpServer::new(self.config.clone());
        self.listen_on(server, port).await
    }

    /// Start `server` on `port` with these routes.
    pub async fn listen_on<S: Server>(self, mut server: S, port: u16) -> Result<ServerHandle, ServerError> {
        tracing::debug!(routes = self.routes.len(), port, "Starting server");
        server.set_request_handler(Arc::new(self.into_dispatcher()));
        server.listen(port).await
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}
