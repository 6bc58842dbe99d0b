//! # Domain Errors
//!
//! Error taxonomy for the session layer.
//!
//! None of these are fatal to the process: a single chain's failure never
//! affects other chains' sessions. Chain teardown is reported through
//! [`crate::domain::NextResponse::Closed`], not through this enum — a
//! removed chain is a normal shutdown signal, not an error.

use super::handle::ChainHandle;
use thiserror::Error;

/// Session layer error types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The chain specification was rejected. Fatal to that creation
    /// attempt only; no session resources remain allocated.
    #[error("Invalid chain specification: {0}")]
    InvalidSpec(String),

    /// The operation referenced a chain that was never registered or has
    /// been removed. Caller bug, or a benign race with a concurrent
    /// `remove_chain` — recoverable either way.
    #[error("Unknown chain handle: {0}")]
    UnknownHandle(ChainHandle),

    /// The request text failed the synchronous well-formedness gate.
    /// Method-level rejection is deferred: it surfaces as an ordinary
    /// JSON-RPC error response from the engine instead.
    #[error("Malformed JSON-RPC request: {0}")]
    MalformedRequest(String),

    /// A capacity limit was hit (chain table full, request queue full).
    /// Recoverable by retry or backoff.
    #[error("Resource exhausted: {0}")]
    ResourceExhausted(String),
}
