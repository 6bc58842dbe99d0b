//! # Lightcell Test Suite
//!
//! Unified test crate for the session layer.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── lifecycle.rs     # create/remove, stale handles, waiter cancellation
//!     ├── ordering.rs      # per-chain FIFO delivery
//!     ├── isolation.rs     # chains never observe each other's traffic
//!     └── subscription.rs  # zero/one/many responses per request
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p session-tests
//! cargo test -p session-tests integration::lifecycle
//! ```

#![allow(dead_code)]
