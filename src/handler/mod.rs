//! Route handlers.
//!
//! # Data Flow
//! ```text
//! Dispatcher
//!     → context.rs (RequestContext: request, path + params, response)
//!     → Handler::call
//!     → reply.rs (Reply: Body | Empty | Pending)
//!     → back to the dispatcher for coercion
//! ```
//!
//! # Design Decisions
//! - Any `Fn(RequestContext) -> impl IntoReply` closure is a handler
//! - Asynchronous work is expressed as `Reply::Pending`, so handlers stay
//!   plain functions and the dispatcher has exactly one suspension point
//! - Handler errors are boxed and propagated, never swallowed

pub mod context;
pub mod reply;

use std::sync::Arc;

pub use context::{Params, RequestContext, RouteInfo};
pub use reply::{BoxError, IntoReply, Reply};

/// A function of the request context producing a [`Reply`].
pub trait Handler: Send + Sync + 'static {
    fn call(&self, ctx: RequestContext) -> Result<Reply, BoxError>;
}

impl<F, R> Handler for F
where
    F: Fn(RequestContext) -> R + Send + Sync + 'static,
    R: IntoReply,
{
    fn call(&self, ctx: RequestContext) -> Result<Reply, BoxError> {
        (self)(ctx).into_reply()
    }
}

/// Handlers are shared read-only across concurrent requests.
pub type SharedHandler = Arc<dyn Handler>;
