//! Braid generators and braid words.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{IrError, IrResult};

/// Direction of an elementary exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Clockwise exchange, σ_i.
    Clockwise,
    /// Counter-clockwise exchange, σ_i⁻¹.
    CounterClockwise,
}

impl Orientation {
    /// The orientation that undoes this one.
    #[inline]
    pub fn reversed(self) -> Self {
        match self {
            Orientation::Clockwise => Orientation::CounterClockwise,
            Orientation::CounterClockwise => Orientation::Clockwise,
        }
    }

    /// Check if this is a clockwise exchange.
    #[inline]
    pub fn is_clockwise(self) -> bool {
        matches!(self, Orientation::Clockwise)
    }
}

/// One elementary crossing of strands `index` and `index + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BraidGenerator {
    /// Left strand of the crossing.
    pub index: u32,
    /// Exchange direction.
    pub orientation: Orientation,
}

impl BraidGenerator {
    /// Create a generator.
    pub fn new(index: u32, orientation: Orientation) -> Self {
        Self { index, orientation }
    }

    /// Clockwise generator σ_index.
    pub fn clockwise(index: u32) -> Self {
        Self::new(index, Orientation::Clockwise)
    }

    /// Counter-clockwise generator σ_index⁻¹.
    pub fn counter_clockwise(index: u32) -> Self {
        Self::new(index, Orientation::CounterClockwise)
    }

    /// The generator that undoes this one.
    pub fn inverse(self) -> Self {
        Self::new(self.index, self.orientation.reversed())
    }
}

impl fmt::Display for BraidGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.orientation {
            Orientation::Clockwise => write!(f, "σ{}", self.index + 1),
            Orientation::CounterClockwise => write!(f, "σ{}⁻¹", self.index + 1),
        }
    }
}

/// An ordered braid program on a fixed number of strands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BraidWord {
    strand_count: u32,
    generators: Vec<BraidGenerator>,
}

impl BraidWord {
    /// Create a braid word, checking every generator against the strand count.
    pub fn new(strand_count: u32, generators: Vec<BraidGenerator>) -> IrResult<Self> {
        if strand_count < 2 {
            return Err(IrError::TooFewStrands(strand_count));
        }
        if let Some(bad) = generators.iter().find(|g| g.index > strand_count - 2) {
            return Err(IrError::StrandIndexOutOfRange {
                index: bad.index,
                strand_count,
            });
        }
        Ok(Self {
            strand_count,
            generators,
        })
    }

    /// Create a word with no crossings.
    pub fn empty(strand_count: u32) -> IrResult<Self> {
        Self::new(strand_count, Vec::new())
    }

    /// Number of strands.
    #[inline]
    pub fn strand_count(&self) -> u32 {
        self.strand_count
    }

    /// The generators in application order.
    #[inline]
    pub fn generators(&self) -> &[BraidGenerator] {
        &self.generators
    }

    /// Number of generators.
    #[inline]
    pub fn len(&self) -> usize {
        self.generators.len()
    }

    /// Check if the word has no crossings.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }

    /// Number of qubits encoded under the n+1 strand convention.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        self.strand_count.saturating_sub(1)
    }

    /// The inverse word: generators reversed and each one inverted.
    pub fn inverse(&self) -> Self {
        Self {
            strand_count: self.strand_count,
            generators: self
                .generators
                .iter()
                .rev()
                .map(|g| g.inverse())
                .collect(),
        }
    }
}

impl fmt::Display for BraidWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "B{}[", self.strand_count)?;
        for (i, generator) in self.generators.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{generator}")?;
        }
        f.write_str("]")
    }
}
