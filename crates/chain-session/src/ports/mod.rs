//! # Ports Module
//!
//! API traits (inbound) and engine dependency traits (outbound).

pub mod inbound;
pub mod outbound;

pub use inbound::ChainRegistryApi;
pub use outbound::{ChainEngine, MockChainEngine, DEFAULT_HEAD_INTERVAL};
