//! Pass trait for gate-list optimization passes.

use tqc_ir::Instruction;

/// A rewriting pass over a flat gate list.
///
/// Passes are the unit of optimization. Each pass rewrites the list into one
/// that realizes the same unitary up to global phase. Passes never fail: a
/// pass that finds nothing to improve returns its input unchanged.
pub trait OptimizationPass: Send + Sync {
    /// Get the name of this pass.
    fn name(&self) -> &str;

    /// Run the pass.
    fn run(&self, gates: Vec<Instruction>) -> Vec<Instruction>;

    /// Check if this pass should run on the current list.
    ///
    /// This can be overridden to skip passes that cannot apply.
    fn should_run(&self, _gates: &[Instruction]) -> bool {
        true
    }
}
