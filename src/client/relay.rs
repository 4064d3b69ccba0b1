use futures::future::BoxFuture;
use thiserror::Error;

use crate::wheel::Outcome;

/// Failures talking to the relay. None of them are fatal to the animator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
    /// The request never got a response.
    #[error("relay unreachable at `{path}`: {message}")]
    Unreachable {
        /// Endpoint that was called.
        path: String,
        /// Transport error text.
        message: String,
    },
    /// The relay answered with a non-success status.
    #[error("relay answered {status} for `{path}`: {message}")]
    Status {
        /// Endpoint that was called.
        path: String,
        /// HTTP status code.
        status: u16,
        /// Response body, if any.
        message: String,
    },
    /// The response body could not be decoded.
    #[error("failed to decode relay response for `{path}`: {message}")]
    Decode {
        /// Endpoint that was called.
        path: String,
        /// Decoder error text.
        message: String,
    },
}

/// Calls the animator makes against the backend relay.
pub trait Relay: Send + Sync {
    /// Consume the pending rigged outcome, if any.
    fn next_outcome(&self) -> BoxFuture<'static, Result<Option<Outcome>, RelayError>>;
    /// Force the next spin; returns the relay's confirmation message.
    fn rig(&self, outcome: Outcome) -> BoxFuture<'static, Result<String, RelayError>>;
    /// Record a spin winner.
    fn report(&self, outcome: Outcome) -> BoxFuture<'static, Result<(), RelayError>>;
    /// Most recent logged results, newest first.
    fn recent(&self) -> BoxFuture<'static, Result<Vec<String>, RelayError>>;
}
