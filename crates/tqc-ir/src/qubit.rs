//! Qubit identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a logical qubit within a gate sequence.
///
/// Under the n+1 strand encoding, qubit `q` lives on the strand pair
/// `(q, q + 1)` and is addressed by the braid generator with index `q`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QubitId(pub u32);

impl QubitId {
    /// The generator index addressing this qubit.
    #[inline]
    pub fn strand_index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<u32> for QubitId {
    fn from(id: u32) -> Self {
        QubitId(id)
    }
}
