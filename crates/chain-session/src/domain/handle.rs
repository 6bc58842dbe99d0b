//! # Chain Handle
//!
//! Opaque, non-forgeable identifier for a registered chain session.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier for a chain session.
///
/// Handles are generational: the registry bumps a slot's generation every
/// time the slot is freed, so a handle held across `remove_chain` can never
/// alias a later session occupying the same slot. Fields are private —
/// only the registry can mint a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChainHandle {
    index: u32,
    generation: u32,
}

impl ChainHandle {
    /// Mint a handle for a slot. Registry-internal.
    pub(crate) fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Slot index into the registry table.
    pub(crate) fn index(self) -> usize {
        self.index as usize
    }

    /// Generation the handle was minted at.
    pub(crate) fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Display for ChainHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "chain-{}.{}", self.index, self.generation)
    }
}
