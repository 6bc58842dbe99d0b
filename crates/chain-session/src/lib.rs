//! # Chain Session
//!
//! Session layer for an embedded blockchain light-client engine.
//!
//! A host registers chain instances from specification documents, submits
//! JSON-RPC requests, and blocks waiting for responses. The engine itself
//! (consensus, networking, block sync) lives behind the [`ChainEngine`]
//! outbound port; this crate owns everything between the host and that
//! seam:
//!
//! | Component | Where |
//! |-----------|-------|
//! | Buffer ownership protocol | `domain/envelope.rs` — move-only envelopes |
//! | Chain registry | `application/registry.rs` — generational handle table |
//! | Request submission channel | per-session bounded `mpsc`, non-blocking enqueue |
//! | Response delivery queue | per-session FIFO with cancellation-safe blocking wait |
//!
//! ## Guarantees
//!
//! - Responses for one chain are delivered in engine production order;
//!   no ordering is promised across chains.
//! - Removing a chain unblocks any outstanding waiter with
//!   [`NextResponse::Closed`] instead of leaving it suspended.
//! - A handle is valid from creation until removal; every operation on a
//!   stale or forged handle fails with `UnknownHandle`, never touches
//!   another chain's state.
//! - A response is released exactly once: releasing is consuming the
//!   envelope by move, so a double release does not compile.
//!
//! ## Module Structure
//!
//! ```text
//! chain-session/
//! ├── domain/          # ChainHandle, envelopes, SessionError
//! ├── ports/           # ChainRegistryApi (inbound), ChainEngine + mock (outbound)
//! ├── application/     # ChainRegistry, ChainSession, ResponseStream
//! └── config.rs        # SessionConfig
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

// Re-exports
pub use application::{ChainRegistry, ResponseStream};
pub use config::SessionConfig;
pub use domain::{ChainHandle, NextResponse, RequestEnvelope, ResponseEnvelope, SessionError};
pub use ports::{ChainEngine, ChainRegistryApi, MockChainEngine, DEFAULT_HEAD_INTERVAL};

/// Default capacity of the chain handle table.
pub const DEFAULT_MAX_CHAINS: usize = 32;

/// Default maximum pending requests per chain.
pub const DEFAULT_REQUEST_QUEUE_CAPACITY: usize = 128;

/// Default per-chain response buffer depth.
pub const DEFAULT_RESPONSE_QUEUE_CAPACITY: usize = 1024;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
