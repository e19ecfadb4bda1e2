//! Request dispatch and reply coercion.
//!
//! # Responsibilities
//! - Resolve the handler for a request (exact → pattern → fallback)
//! - Build the per-request context with captured parameters
//! - Invoke the handler and write its reply unless the handler already
//!   finalized the response
//!
//! # Design Decisions
//! - The only suspension point is awaiting a `Reply::Pending`
//! - No error boundary: handler failures are returned to the server
//! - No cancellation or timeout here; a pending reply that never resolves
//!   keeps the request open until the server gives up on it

use std::sync::Arc;

use thiserror::Error;

use crate::handler::{BoxError, Reply, RequestContext, RouteInfo};
use crate::http::{ServerRequest, ServerResponse};
use crate::routing::method::Method;
use crate::routing::table::RouteTable;

/// A handler failed while producing its reply.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The handler itself returned an error.
    #[error("handler for {method} {path} failed: {source}")]
    Handler {
        method: Method,
        path: String,
        #[source]
        source: BoxError,
    },
    /// The handler's pending reply resolved to an error.
    #[error("pending reply for {method} {path} failed: {source}")]
    Deferred {
        method: Method,
        path: String,
        #[source]
        source: BoxError,
    },
}

/// Routes requests through a frozen [`RouteTable`].
///
/// Cheap to share: the table is behind an `Arc` and never mutated.
#[derive(Clone)]
pub struct Dispatcher {
    table: Arc<RouteTable>,
}

impl Dispatcher {
    pub fn new(table: RouteTable) -> Self {
        Self {
            table: Arc::new(table),
        }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Handle one request.
    pub async fn dispatch(
        &self,
        request: Arc<dyn ServerRequest>,
        response: Arc<dyn ServerResponse>,
    ) -> Result<(), DispatchError> {
        let method = request.method();
        let path = request.path().to_string();

        let resolution = self.table.resolve(method, &path);
        tracing::debug!(
            %method,
            path = %path,
            route = ?resolution.kind,
            params = resolution.params.len(),
            "Dispatching request"
        );

        let ctx = RequestContext::new(
            request,
            RouteInfo {
                path: path.clone(),
                params: resolution.params,
            },
            response.clone(),
        );

        let reply = match resolution.handler.call(ctx) {
            Ok(reply) => reply,
            Err(source) => return Err(DispatchError::Handler { method, path, source }),
        };

        match write_reply(reply, response.as_ref()).await {
            Ok(()) => Ok(()),
            Err(source) => Err(DispatchError::Deferred { method, path, source }),
        }
    }
}

/// Resolve `reply` and write it if there is a body and the response is
/// still open.
async fn write_reply(mut reply: Reply, response: &dyn ServerResponse) -> Result<(), BoxError> {
    loop {
        match reply {
            Reply::Pending(future) => reply = future.await?,
            Reply::Body(body) => {
                if response.is_ended() {
                    tracing::trace!("Response already ended by handler; dropping reply body");
                } else {
                    response.send(body);
                }
                return Ok(());
            }
            Reply::Empty => return Ok(()),
        }
    }
}
