//! Response capability.
//!
//! # Design Decisions
//! - A response is finalized at most once: `send` and `end` after the first
//!   finalize are ignored
//! - Status changes after finalize are ignored as well
//! - `BufferedResponse` holds the state behind a mutex so handlers, pending
//!   replies and the dispatcher can share it through `Arc`

use std::sync::{Mutex, MutexGuard, PoisonError};

use axum::body::{Body, Bytes};
use axum::http::StatusCode;
use axum::response::Response;

/// Writable side of a request, shared between handler and dispatcher.
pub trait ServerResponse: Send + Sync {
    /// Write `body` and finalize the response.
    fn send(&self, body: Bytes);

    /// Set the status code. Returns the response for chaining.
    fn set_status_code(&self, status: StatusCode) -> &dyn ServerResponse;

    /// Finalize the response, keeping whatever body was written so far.
    fn end(&self);

    /// True once `send` or `end` has taken effect.
    fn is_ended(&self) -> bool;
}

#[derive(Debug)]
struct ResponseState {
    status: StatusCode,
    body: Bytes,
    ended: bool,
    finalize_count: usize,
}

/// Response held in memory until the dispatcher returns.
#[derive(Debug)]
pub struct BufferedResponse {
    state: Mutex<ResponseState>,
}

impl BufferedResponse {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(ResponseState {
                status: StatusCode::OK,
                body: Bytes::new(),
                ended: false,
                finalize_count: 0,
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, ResponseState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn status(&self) -> StatusCode {
        self.state().status
    }

    pub fn body(&self) -> Bytes {
        self.state().body.clone()
    }

    /// Number of finalizes that took effect. Never more than one.
    pub fn finalize_count(&self) -> usize {
        self.state().finalize_count
    }

    /// Build the HTTP response from the current state.
    ///
    /// A response nobody ended is sent as-is with its current status and body.
    pub fn to_response(&self) -> Response {
        let state = self.state();
        if !state.ended {
            tracing::debug!(status = %state.status, "Response was never ended; sending current state");
        }
        let mut response = Response::new(Body::from(state.body.clone()));
        *response.status_mut() = state.status;
        response
    }
}

impl Default for BufferedResponse {
    fn default() -> Self {
        Self::new()
    }
}

impl ServerResponse for BufferedResponse {
    fn send(&self, body: Bytes) {
        let mut state = self.state();
        if state.ended {
            tracing::debug!(bytes = body.len(), "Ignoring send on ended response");
            return;
        }
        state.body = body;
        state.ended = true;
        state.finalize_count += 1;
    }

    fn set_status_code(&self, status: StatusCode) -> &dyn ServerResponse {
        let mut state = self.state();
        if state.ended {
            tracing::debug!(%status, "Ignoring status change on ended response");
        } else {
            state.status = status;
        }
        self
    }

    fn end(&self) {
        let mut state = self.state();
        if state.ended {
            return;
        }
        state.ended = true;
        state.finalize_count += 1;
    }

    fn is_ended(&self) -> bool {
        self.state().ended
    }
}
