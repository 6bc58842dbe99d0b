//! # Inbound Ports
//!
//! The API a host program uses to drive chain sessions.

use crate::domain::{ChainHandle, NextResponse, SessionError};
use async_trait::async_trait;

/// Chain registry API - inbound port.
///
/// The five boundary operations of the session layer. JSON-RPC payloads
/// are opaque text here: this layer guarantees ordered, ownership-safe
/// transport per chain, nothing about payload schema.
///
/// The sixth boundary operation, releasing a response, is not a method:
/// it is [`crate::domain::ResponseEnvelope::into_text`], consumption by
/// move.
#[async_trait]
pub trait ChainRegistryApi: Send + Sync {
    /// Validate a chain specification and start a session for it.
    ///
    /// # Errors
    ///
    /// - `InvalidSpec` if the engine rejects the document
    /// - `ResourceExhausted` if the chain table is full
    async fn add_chain(&self, spec: &str) -> Result<ChainHandle, SessionError>;

    /// Stop a session, halt its engine activity, and invalidate the handle.
    ///
    /// Safe to call while a `wait_next_response` on the same handle is
    /// outstanding: that call returns `Closed` promptly.
    ///
    /// # Errors
    ///
    /// - `UnknownHandle` if already removed or never valid
    async fn remove_chain(&self, handle: ChainHandle) -> Result<(), SessionError>;

    /// Enqueue a JSON-RPC request for asynchronous processing.
    ///
    /// Non-blocking; the request text is copied before this returns and
    /// the caller keeps its buffer. Exactly one processing attempt is
    /// scheduled per successful call; how many responses that attempt
    /// produces (zero, one, or many for subscriptions) is up to the engine.
    ///
    /// # Errors
    ///
    /// - `UnknownHandle` if the chain is invalid or removed
    /// - `MalformedRequest` if the text is not well-formed JSON
    /// - `ResourceExhausted` if the chain's request queue is full
    async fn submit_request(&self, handle: ChainHandle, request: &str)
        -> Result<(), SessionError>;

    /// Suspend until the chain produces a response or is removed.
    ///
    /// Responses for one chain arrive in the order the engine produced
    /// them. One logical consumer per handle at a time: concurrent waiters
    /// are serialized, each delivered response goes to exactly one of them.
    ///
    /// # Errors
    ///
    /// - `UnknownHandle`, immediately and without blocking, if the handle
    ///   was never valid or the chain was already removed
    async fn wait_next_response(&self, handle: ChainHandle)
        -> Result<NextResponse, SessionError>;
}
