//! HTTP server collaborator.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum serve loop, tower-http layers)
//!     → request.rs (HttpRequest: method, path, headers)
//!     → routing::Dispatcher (route lookup, handler, reply coercion)
//!     → response.rs (BufferedResponse: status, body, ended flag)
//!     → Send to client
//! ```
//!
//! # Design Decisions
//! - The routing core only sees the `ServerRequest` / `ServerResponse` /
//!   `Server` traits; axum is one implementation of them
//! - Every request enters through a single axum fallback handler
//! - Status mapping for dispatch failures (500) and unroutable methods (405)
//!   lives here, not in the router

pub mod request;
pub mod response;
pub mod server;

pub use axum::http::StatusCode;

pub use request::{HttpRequest, ServerRequest};
pub use response::{BufferedResponse, ServerResponse};
pub use server::{HttpServer, Server, ServerError, ServerHandle};
