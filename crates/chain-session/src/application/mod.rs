//! # Application Module
//!
//! The registry service, per-chain session state, and the stream adapter.

pub mod registry;
pub(crate) mod session;
pub mod stream;

pub use registry::ChainRegistry;
pub use stream::ResponseStream;
