//! Peephole optimization over flat gate lists.
//!
//! Every pass preserves the represented unitary up to global phase and never
//! lengthens the list.

mod cancel;
mod commute;
mod merge;
mod template;


use serde::{Deserialize, Serialize};
use std::fmt;

use tqc_ir::{Instruction, dependency_depth, t_count};

use crate::manager::OptimizationPipeline;

pub use cancel::{CancelInverses, cancel_inverses};
pub use commute::{
    CommutationCancellation, CommuteCliffordsLeft, commutation_cancellation, commute_cliffords_left,
    commute_cliffords_left_until_stable, commutes,
};
pub use merge::{MergeAdjacentGates, merge_adjacent_gates};
pub use template::{TemplateMatch, template_match, template_match_until_stable};

/// Tolerance for angle comparisons.
pub(super) const EPSILON: f64 = 1e-10;

/// Optimize `gates` at `level` (0-2; higher levels behave like 2).
pub fn optimize(gates: Vec<Instruction>, level: u8) -> Vec<Instruction> {
    OptimizationPipeline::for_level(level).run(gates).0
}

/// Optimize and report before/after metrics.
pub fn optimize_with_stats(gates: Vec<Instruction>, level: u8) -> (Vec<Instruction>, OptimizationStats) {
    let num_qubits = width(&gates);
    let original_gate_count = gates.len();
    let original_t_count = t_count(&gates);
    let original_depth = dependency_depth(&gates, num_qubits);

    let (optimized, passes_applied) = OptimizationPipeline::for_level(level).run(gates);

    let stats = OptimizationStats {
        original_gate_count,
        optimized_gate_count: optimized.len(),
        original_t_count,
        optimized_t_count: t_count(&optimized),
        original_depth,
        optimized_depth: dependency_depth(&optimized, num_qubits),
        passes_applied,
    };
    (optimized, stats)
}

fn width(gates: &[Instruction]) -> u32 {
    gates
        .iter()
        .flat_map(|g| g.qubits.iter())
        .map(|q| q.0 + 1)
        .max()
        .unwrap_or(0)
}

/// Before/after metrics of an optimization run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OptimizationStats {
    /// Gate count before.
    pub original_gate_count: usize,
    /// Gate count after.
    pub optimized_gate_count: usize,
    /// T-count before.
    pub original_t_count: usize,
    /// T-count after.
    pub optimized_t_count: usize,
    /// Depth before.
    pub original_depth: usize,
    /// Depth after.
    pub optimized_depth: usize,
    /// Passes that changed the list, in first-applied order.
    pub passes_applied: Vec<String>,
}

impl OptimizationStats {
    /// Gates removed.
    pub fn gates_removed(&self) -> usize {
        self.original_gate_count.saturating_sub(self.optimized_gate_count)
    }

    /// T gates removed.
    pub fn t_gates_removed(&self) -> usize {
        self.original_t_count.saturating_sub(self.optimized_t_count)
    }
}

impl fmt::Display for OptimizationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "OptimizationStats:")?;
        writeln!(
            f,
            "  gates: {} -> {}",
            self.original_gate_count, self.optimized_gate_count
        )?;
        writeln!(
            f,
            "  T-count: {} -> {}",
            self.original_t_count, self.optimized_t_count
        )?;
        writeln!(f, "  depth: {} -> {}", self.original_depth, self.optimized_depth)?;
        if self.passes_applied.is_empty() {
            writeln!(f, "  passes: none")
        } else {
            writeln!(f, "  passes: {}", self.passes_applied.join(", "))
        }
    }
}
