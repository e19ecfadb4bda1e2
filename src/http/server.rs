//! HTTP server setup and the server capability.
//!
//! # Responsibilities
//! - Bind the TCP listener and report the bound address
//! - Wire up tower-http middleware (tracing, request ID, timeout)
//! - Hand every request to the dispatcher
//! - Map dispatch failures and unroutable methods to status codes
//! - Graceful shutdown through a `ServerHandle`

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::http::request::HttpRequest;
use crate::http::response::BufferedResponse;
use crate::lifecycle::Shutdown;
use crate::observability::metrics;
use crate::routing::{Dispatcher, Method};

/// Error type for server operations.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Failed to bind to address.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// `listen` was called before a request handler was installed.
    #[error("no request handler installed")]
    NoHandler,

    /// The serve loop failed after binding.
    #[error("server failed: {0}")]
    Serve(#[from] std::io::Error),

    /// The serve task panicked or was cancelled.
    #[error("server task aborted: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Something that can accept connections and feed them to a dispatcher.
pub trait Server: Send {
    fn set_request_handler(&mut self, dispatcher: Arc<Dispatcher>);

    /// Start accepting connections. Resolves once the listener is bound.
    fn listen(self, port: u16) -> impl Future<Output = Result<ServerHandle, ServerError>> + Send;
}

/// A running server.
///
/// Dropping the handle detaches the server: it keeps serving until the
/// process exits. Keep the handle to stop it with [`shutdown`](Self::shutdown).
#[derive(Debug)]
pub struct ServerHandle {
    local_addr: SocketAddr,
    shutdown: Shutdown,
    task: JoinHandle<Result<(), std::io::Error>>,
}

impl ServerHandle {
    /// The address actually bound (useful with port 0).
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Trigger for stopping the server from elsewhere.
    pub fn shutdown_trigger(&self) -> Shutdown {
        self.shutdown.clone()
    }

    /// Stop accepting connections, drain in-flight requests, and wait.
    pub async fn shutdown(self) -> Result<(), ServerError> {
        self.shutdown.trigger();
        self.wait().await
    }

    /// Wait for the serve loop to exit.
    pub async fn wait(self) -> Result<(), ServerError> {
        self.task.await??;
        Ok(())
    }
}

/// axum-based HTTP server.
pub struct HttpServer {
    config: ServerConfig,
    dispatcher: Option<Arc<Dispatcher>>,
}

impl HttpServer {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            dispatcher: None,
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the axum router with all middleware layers.
    #[allow(deprecated)]
    pub fn build_router(config: &ServerConfig, dispatcher: Arc<Dispatcher>) -> Router {
        Router::new()
            .fallback(serve_request)
            .with_state(dispatcher)
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }
}

impl Server for HttpServer {
    fn set_request_handler(&mut self, dispatcher: Arc<Dispatcher>) {
        self.dispatcher = Some(dispatcher);
    }

    fn listen(self, port: u16) -> impl Future<Output = Result<ServerHandle, ServerError>> + Send {
        async move {
            let dispatcher = self.dispatcher.ok_or(ServerError::NoHandler)?;
            let addr = format!("{}:{}", self.config.host, port);

            let listener = TcpListener::bind(&addr)
                .await
                .map_err(|source| ServerError::Bind {
                    addr: addr.clone(),
                    source,
                })?;
            let local_addr = listener
                .local_addr()
                .map_err(|source| ServerError::Bind { addr, source })?;

            tracing::info!(address = %local_addr, "Listening for connections");

            let app = Self::build_router(&self.config, dispatcher);
            let shutdown = Shutdown::new();
            let stopped = shutdown.notified();

            let task = tokio::spawn(async move {
                axum::serve(listener, app)
                    .with_graceful_shutdown(stopped)
                    .await?;
                tracing::info!(address = %local_addr, "HTTP server stopped");
                Ok::<(), std::io::Error>(())
            });

            Ok(ServerHandle {
                local_addr,
                shutdown,
                task,
            })
        }
    }
}

/// Single entry point for every request.
async fn serve_request(
    State(dispatcher): State<Arc<Dispatcher>>,
    request: Request<Body>,
) -> Response {
    let start = Instant::now();
    let (parts, _body) = request.into_parts();

    let method = match Method::try_from(&parts.method) {
        Ok(method) => method,
        Err(e) => {
            tracing::warn!(error = %e, path = %parts.uri.path(), "Rejecting request");
            metrics::record_request(parts.method.as_str(), 405, start);
            return StatusCode::METHOD_NOT_ALLOWED.into_response();
        }
    };

    let request = HttpRequest::from_parts(method, &parts);
    let request_id = request.request_id().unwrap_or("unknown").to_string();
    let response = Arc::new(BufferedResponse::new());

    let http_response = match dispatcher.dispatch(Arc::new(request), response.clone()).await {
        Ok(()) => response.to_response(),
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Request handler failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    };

    metrics::record_request(method.as_str(), http_response.status().as_u16(), start);
    http_response
}
