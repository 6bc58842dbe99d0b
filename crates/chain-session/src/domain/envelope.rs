//! # Envelopes
//!
//! Units of text crossing the host/engine boundary, plus their
//! ownership and ordering metadata.
//!
//! ## Ownership Protocol
//!
//! | Direction | Rule |
//! |-----------|------|
//! | Host → engine | Text is accepted as `&str` and copied before the call returns; the caller keeps its buffer |
//! | Engine → host | Text is moved into a [`ResponseEnvelope`]; [`ResponseEnvelope::into_text`] is the only way to extract it |
//!
//! `ResponseEnvelope` deliberately does not implement `Clone`: consuming it
//! twice is a compile error, which is the whole point. There is no manual
//! release call to forget and no release call to make twice.

use super::handle::ChainHandle;

/// A submitted request together with its per-chain submission order.
///
/// Sequence numbers are monotonically increasing within one chain and
/// carry no meaning across chains.
#[derive(Debug)]
pub struct RequestEnvelope {
    sequence: u64,
    text: String,
}

impl RequestEnvelope {
    pub(crate) fn new(sequence: u64, text: String) -> Self {
        Self { sequence, text }
    }

    /// Position of this request in its chain's submission order.
    #[must_use]
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// The raw JSON-RPC request text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Consume the envelope, yielding the request text.
    #[must_use]
    pub fn into_text(self) -> String {
        self.text
    }
}

/// An owned response handed to the host by the delivery queue.
///
/// Move-only: extracting the payload consumes the envelope, so a response
/// can be released exactly once.
#[derive(Debug)]
pub struct ResponseEnvelope {
    chain: ChainHandle,
    text: String,
}

impl ResponseEnvelope {
    pub(crate) fn new(chain: ChainHandle, text: String) -> Self {
        Self { chain, text }
    }

    /// Handle of the chain this response belongs to.
    #[must_use]
    pub fn chain(&self) -> ChainHandle {
        self.chain
    }

    /// Borrow the response text without releasing it.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Release the envelope, transferring ownership of the text to the
    /// caller. This is the one and only release operation.
    #[must_use]
    pub fn into_text(self) -> String {
        self.text
    }
}

/// Outcome of waiting on a chain's response queue.
#[derive(Debug)]
pub enum NextResponse {
    /// A response was produced; the host now owns the envelope.
    Response(ResponseEnvelope),
    /// The chain was removed while (or before) the wait was outstanding.
    /// Not an error — this is the normal shutdown signal.
    Closed,
}

impl NextResponse {
    /// True if the chain was torn down.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Closed)
    }
}
