//! Pipeline for orchestrating optimization passes.

use tracing::{debug, instrument};

use tqc_ir::Instruction;

use crate::optimize::{
    CancelInverses, CommutationCancellation, MergeAdjacentGates, TemplateMatch,
};
use crate::pass::OptimizationPass;

/// Iteration cap for the aggressive level.
pub const AGGRESSIVE_ITERATIONS: usize = 10;

/// Runs a sequence of optimization passes, optionally to a fixed point.
pub struct OptimizationPipeline {
    /// The passes to execute, in order.
    passes: Vec<Box<dyn OptimizationPass>>,
    /// Maximum number of sweeps over `passes`.
    max_iterations: usize,
}

impl OptimizationPipeline {
    /// Create an empty pipeline that sweeps once.
    pub fn new() -> Self {
        Self {
            passes: vec![],
            max_iterations: 1,
        }
    }

    /// The preset pipeline for an optimization level.
    ///
    /// - Level 0: No passes
    /// - Level 1: One sweep of inverse cancellation and adjacent merging
    /// - Level 2: Commutation cancellation, templates and level 1, swept to
    ///   a fixed point under [`AGGRESSIVE_ITERATIONS`]
    pub fn for_level(level: u8) -> Self {
        let mut pipeline = Self::new();
        if level >= 2 {
            pipeline.add_pass(CommutationCancellation);
            pipeline.add_pass(TemplateMatch);
            pipeline.max_iterations = AGGRESSIVE_ITERATIONS;
        }
        if level >= 1 {
            pipeline.add_pass(CancelInverses);
            pipeline.add_pass(MergeAdjacentGates);
        }
        pipeline
    }

    /// Add a pass to the pipeline.
    pub fn add_pass(&mut self, pass: impl OptimizationPass + 'static) {
        self.passes.push(Box::new(pass));
    }

    /// Set the maximum number of sweeps.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations.max(1);
        self
    }

    /// Run the passes, returning the rewritten list and the names of the
    /// passes that changed it.
    ///
    /// A pass whose output is longer than its input is discarded.
    #[instrument(skip(self, gates))]
    pub fn run(&self, gates: Vec<Instruction>) -> (Vec<Instruction>, Vec<String>) {
        let mut current = gates;
        let mut applied: Vec<String> = Vec::new();

        for iteration in 0..self.max_iterations {
            let mut changed = false;
            for pass in &self.passes {
                if !pass.should_run(&current) {
                    debug!("Skipping pass: {}", pass.name());
                    continue;
                }
                let before = current.len();
                let candidate = pass.run(current.clone());
                if candidate.len() > before {
                    debug!("Discarding {}: {} -> {} gates", pass.name(), before, candidate.len());
                    continue;
                }
                if candidate != current {
                    debug!("Pass {} rewrote {} -> {} gates", pass.name(), before, candidate.len());
                    changed = true;
                    if !applied.iter().any(|name| name == pass.name()) {
                        applied.push(pass.name().to_string());
                    }
                    current = candidate;
                }
            }
            if !changed {
                debug!("Pipeline stable after {} iterations", iteration + 1);
                break;
            }
        }

        (current, applied)
    }

    /// Get the number of passes.
    pub fn len(&self) -> usize {
        self.passes.len()
    }

    /// Check if the pipeline has no passes.
    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }
}

impl Default for OptimizationPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tqc_ir::{QubitId, StandardGate};

    struct Grow;

    impl OptimizationPass for Grow {
        fn name(&self) -> &'static str {
            "grow"
        }

        fn run(&self, mut gates: Vec<Instruction>) -> Vec<Instruction> {
            gates.push(Instruction::single_qubit_gate(StandardGate::H, QubitId(0)));
            gates
        }
    }

    #[test]
    fn test_level_presets() {
        assert!(OptimizationPipeline::for_level(0).is_empty());
        assert_eq!(OptimizationPipeline::for_level(1).len(), 2);
        assert_eq!(OptimizationPipeline::for_level(2).len(), 4);
    }

    #[test]
    fn test_growing_pass_is_discarded() {
        let mut pipeline = OptimizationPipeline::new();
        pipeline.add_pass(Grow);
        let gates = vec![Instruction::single_qubit_gate(StandardGate::T, QubitId(0))];
        let (out, applied) = pipeline.run(gates.clone());
        assert_eq!(out, gates);
        assert!(applied.is_empty());
    }

    #[test]
    fn test_records_applied_passes() {
        let gates = vec![
            Instruction::single_qubit_gate(StandardGate::T, QubitId(0)),
            Instruction::single_qubit_gate(StandardGate::Tdg, QubitId(0)),
        ];
        let (out, applied) = OptimizationPipeline::for_level(1).run(gates);
        assert!(out.is_empty());
        assert_eq!(applied, vec!["CancelInverses".to_string()]);
    }
}
