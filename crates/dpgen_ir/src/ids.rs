//! Opaque handle newtypes.

use crate::arena::ArenaId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Handle to a [`Signal`](crate::signal::Signal) owned by a
/// [`SignalRegistry`](crate::signal::SignalRegistry).
///
/// Handles are ordered by creation: a smaller raw index was created earlier.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct SignalId(u32);

impl SignalId {
    /// Creates a handle from a raw index.
    pub fn from_raw(index: u32) -> Self {
        Self(index)
    }

    /// Returns the raw index.
    pub fn as_raw(self) -> u32 {
        self.0
    }
}

impl ArenaId for SignalId {
    fn from_raw(index: u32) -> Self {
        Self(index)
    }

    fn as_raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for SignalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "%{}", self.0)
    }
}
