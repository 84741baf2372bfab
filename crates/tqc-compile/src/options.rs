//! Compiler configuration.

use serde::{Deserialize, Serialize};
use tqc_ir::AnyonType;

use crate::error::{CompileError, CompileResult};

/// Default tolerance for accepting a compiled gate.
pub const DEFAULT_TOLERANCE: f64 = 1e-2;

/// Default shortest word length scanned by the approximation search.
pub const DEFAULT_SEED_LENGTH: usize = 1;

/// Default longest word length scanned by the approximation search.
pub const DEFAULT_MAX_LENGTH: usize = 8;

/// Longest word length the approximation search accepts at all.
pub const MAX_SEARCH_LENGTH: usize = 14;

/// Highest optimization level.
pub const MAX_OPTIMIZATION_LEVEL: u8 = 2;

/// Word lengths scanned by the approximation search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Shortest base-set length tried.
    pub seed_length: usize,
    /// Longest base-set length tried.
    pub max_length: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            seed_length: DEFAULT_SEED_LENGTH,
            max_length: DEFAULT_MAX_LENGTH,
        }
    }
}

/// Options for gate-to-braid compilation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompileOptions {
    /// Target anyon model.
    pub anyon_type: AnyonType,
    /// Per-gate error accepted before compilation fails.
    pub tolerance: f64,
    /// Approximation search bounds.
    pub search: SearchConfig,
}

impl CompileOptions {
    /// Create options for an anyon model with default tolerance and search bounds.
    pub fn new(anyon_type: AnyonType) -> Self {
        Self {
            anyon_type,
            tolerance: DEFAULT_TOLERANCE,
            search: SearchConfig::default(),
        }
    }

    /// Set the per-gate tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the longest word length the approximation search scans.
    ///
    /// Values above [`MAX_SEARCH_LENGTH`] are rejected when the search runs.
    #[must_use]
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.search.max_length = max_length;
        self
    }

    /// Set the shortest word length the approximation search scans.
    #[must_use]
    pub fn with_seed_length(mut self, seed_length: usize) -> Self {
        self.search.seed_length = seed_length;
        self
    }

    /// Set both search bounds at once.
    #[must_use]
    pub fn with_search(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self
    }

    /// Check that the tolerance is a finite, non-negative number.
    ///
    /// # Errors
    ///
    /// [`CompileError::Validation`] otherwise.
    pub fn validate(&self) -> CompileResult<()> {
        check_tolerance(self.tolerance)
    }
}

/// Reject NaN, infinite and negative tolerances.
pub(crate) fn check_tolerance(tolerance: f64) -> CompileResult<()> {
    if tolerance.is_finite() && tolerance >= 0.0 {
        Ok(())
    } else {
        Err(CompileError::Validation(format!(
            "tolerance must be finite and non-negative, got {tolerance}"
        )))
    }
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self::new(AnyonType::Ising)
    }
}

/// Options for braid-to-gate compilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BraidToGateOptions {
    /// Optimization level applied to the produced gates (0-2).
    pub optimization_level: u8,
}

impl BraidToGateOptions {
    /// Create options with no optimization.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the optimization level.
    ///
    /// - Level 0: No optimization
    /// - Level 1: Cancel inverses and merge adjacent phases
    /// - Level 2: Iterate commutation, templates and level 1 to a fixed point
    #[must_use]
    pub fn with_optimization_level(mut self, level: u8) -> Self {
        self.optimization_level = level.min(MAX_OPTIMIZATION_LEVEL);
        self
    }
}
