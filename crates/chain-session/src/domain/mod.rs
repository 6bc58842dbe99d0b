//! # Domain Module
//!
//! Core domain types for the session layer: handles, envelopes, errors.

pub mod envelope;
pub mod errors;
pub mod handle;

pub use envelope::{NextResponse, RequestEnvelope, ResponseEnvelope};
pub use errors::SessionError;
pub use handle::ChainHandle;
