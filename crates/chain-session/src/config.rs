//! # Session Configuration
//!
//! Capacity limits for the registry and its per-chain queues.

use crate::{
    DEFAULT_MAX_CHAINS, DEFAULT_REQUEST_QUEUE_CAPACITY, DEFAULT_RESPONSE_QUEUE_CAPACITY,
};
use serde::{Deserialize, Serialize};

/// Session layer configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Maximum number of simultaneously registered chains.
    pub max_chains: usize,

    /// Maximum pending requests per chain before `submit_request`
    /// reports `ResourceExhausted`.
    pub request_queue_capacity: usize,

    /// Per-chain response buffer depth between the engine worker and
    /// the consumer of `wait_next_response`.
    pub response_queue_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_chains: DEFAULT_MAX_CHAINS,
            request_queue_capacity: DEFAULT_REQUEST_QUEUE_CAPACITY,
            response_queue_capacity: DEFAULT_RESPONSE_QUEUE_CAPACITY,
        }
    }
}

impl SessionConfig {
    /// Create a config for testing (smaller values).
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            max_chains: 4,
            request_queue_capacity: 8,
            response_queue_capacity: 16,
        }
    }
}
