//! Handler return values and their coercion.

use std::fmt;
use std::future::Future;

use axum::body::Bytes;
use futures_util::future::{BoxFuture, FutureExt};
use serde::Serialize;

/// Error raised by a handler, either directly or by a pending reply.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// What a handler produced.
pub enum Reply {
    /// Write this as the response body and finalize, unless the handler
    /// already finalized the response.
    Body(Bytes),
    /// Write nothing. The handler owns the response.
    Empty,
    /// Resolve first, then apply the same rules to the resolved reply.
    Pending(BoxFuture<'static, Result<Reply, BoxError>>),
}

impl Reply {
    /// Defer the reply to `future`.
    pub fn pending<F>(future: F) -> Self
    where
        F: Future + Send + 'static,
        F::Output: IntoReply,
    {
        Reply::Pending(async move { future.await.into_reply() }.boxed())
    }

    /// Serialize `value` as a JSON body.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, BoxError> {
        let body = serde_json::to_vec(value)?;
        Ok(Reply::Body(Bytes::from(body)))
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Reply::Pending(_))
    }
}

impl fmt::Debug for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Body(body) => f.debug_tuple("Body").field(body).finish(),
            Reply::Empty => f.write_str("Empty"),
            Reply::Pending(_) => f.write_str("Pending(..)"),
        }
    }
}

/// Conversion from a handler's natural return type into a [`Reply`].
pub trait IntoReply {
    fn into_reply(self) -> Result<Reply, BoxError>;
}

impl IntoReply for Reply {
    fn into_reply(self) -> Result<Reply, BoxError> {
        Ok(self)
    }
}

impl IntoReply for () {
    fn into_reply(self) -> Result<Reply, BoxError> {
        Ok(Reply::Empty)
    }
}

impl IntoReply for &'static str {
    fn into_reply(self) -> Result<Reply, BoxError> {
        Ok(Reply::Body(Bytes::from_static(self.as_bytes())))
    }
}

impl IntoReply for String {
    fn into_reply(self) -> Result<Reply, BoxError> {
        Ok(Reply::Body(Bytes::from(self)))
    }
}

impl IntoReply for Bytes {
    fn into_reply(self) -> Result<Reply, BoxError> {
        Ok(Reply::Body(self))
    }
}

impl IntoReply for Vec<u8> {
    fn into_reply(self) -> Result<Reply, BoxError> {
        Ok(Reply::Body(Bytes::from(self)))
    }
}

impl<T: IntoReply> IntoReply for Option<T> {
    fn into_reply(self) -> Result<Reply, BoxError> {
        match self {
            Some(value) => value.into_reply(),
            None => Ok(Reply::Empty),
        }
    }
}

impl<T, E> IntoReply for Result<T, E>
where
    T: IntoReply,
    E: Into<BoxError>,
{
    fn into_reply(self) -> Result<Reply, BoxError> {
        match self {
            Ok(value) => value.into_reply(),
            Err(err) => Err(err.into()),
        }
    }
}
