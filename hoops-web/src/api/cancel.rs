//! Per-request cancellation
//!
//! Every handler receives a child of the server's shutdown token. The token
//! is armed with a drop guard, so it fires when the request future is dropped
//! (client went away) as well as on server shutdown. Repository calls race
//! against it.

use std::convert::Infallible;
use std::ops::Deref;

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use tokio_util::sync::{CancellationToken, DropGuard};

/// Cancellation signal scoped to one inbound request
pub struct RequestCancellation {
    token: CancellationToken,
    _guard: DropGuard,
}

impl RequestCancellation {
    /// Derive a request-scoped token from `parent`
    pub fn new(parent: &CancellationToken) -> Self {
        let token = parent.child_token();
        Self {
            _guard: token.clone().drop_guard(),
            token,
        }
    }
}

impl Deref for RequestCancellation {
    type Target = CancellationToken;

    fn deref(&self) -> &Self::Target {
        &self.token
    }
}

impl<S> FromRequestParts<S> for RequestCancellation
where
    S: Send + Sync,
    CancellationToken: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::new(&CancellationToken::from_ref(state)))
    }
}
