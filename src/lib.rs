//! Waypost: a small HTTP request router.
//!
//! Routes are registered against a method and a path spec, frozen into an
//! immutable table, and served through an axum-based server. Handlers return
//! a body, nothing, or a pending reply; the dispatcher writes bodies unless
//! the handler already finalized the response itself.

// Core
pub mod handler;
pub mod routing;
pub mod router;

// Server collaborator
pub mod http;

// Cross-cutting concerns
pub mod config;
pub mod lifecycle;
pub mod observability;

pub use config::WaypostConfig;
pub use handler::{BoxError, Handler, IntoReply, Params, Reply, RequestContext, RouteInfo};
pub use http::{HttpServer, Server, ServerError, ServerHandle};
pub use router::Router;
pub use routing::{Dispatcher, Method};
