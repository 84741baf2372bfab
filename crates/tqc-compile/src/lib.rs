//! Topological Quantum Compilation Framework
//!
//! This crate translates between gate sequences and braid words over an
//! anyon model, in both directions, and optimizes the gate lists it reads
//! and writes.
//!
//! # Overview
//!
//! Compiling gates to braids runs in three stages:
//! 1. **Transpilation**: Lower composite gates (CZ, SWAP, CCX, MCZ, CP) to the
//!    elementary set
//! 2. **Exact mapping**: Under Ising, phase gates whose angle is a multiple of
//!    π/2 become braid words with zero error
//! 3. **Approximation**: Every other single-qubit gate is matched against a
//!    memoized base set of short braid words
//!
//! # Architecture
//!
//! ```text
//! GateSequence
//!       │
//!       ▼
//! ┌────────────┐
//! │ Transpiler │ ── fixed point over composite gates
//! └────────────┘
//!       │
//!       ├── ExactGateMapper (Ising)
//!       └── ApproximationSearch (base sets up to length 14)
//!       │
//!       ▼
//! CompilationResult ── braids, per-gate error, warnings
//!
//! BraidWord ── BraidToGateCompiler ── OptimizationPipeline ──▶ GateSequence
//! ```
//!
//! # Example: Round Trip
//!
//! ```rust
//! use tqc_compile::{BraidToGateOptions, compile_gate_sequence, compile_to_gates};
//! use tqc_ir::{AnyonType, GateSequence, Instruction, QubitId, StandardGate};
//!
//! let seq = GateSequence::new(
//!     1,
//!     vec![Instruction::single_qubit_gate(StandardGate::S, QubitId(0))],
//! )
//! .unwrap();
//!
//! let result = compile_gate_sequence(&seq, 1e-10, AnyonType::Ising).unwrap();
//! assert!(result.is_exact);
//!
//! let braid = &result.compiled_braids[0];
//! let back = compile_to_gates(braid, AnyonType::Ising, &BraidToGateOptions::new()).unwrap();
//! assert_eq!(back.gates()[0].as_gate(), Some(&StandardGate::S));
//! ```
//!
//! # Optimization Levels
//!
//! | Level | Passes Included |
//! |-------|-----------------|
//! | 0 | None |
//! | 1 | Inverse cancellation, adjacent merging |
//! | 2 | + Commutation cancellation, templates, to a fixed point |
//!
//! # Custom Passes
//!
//! Implement the [`OptimizationPass`] trait and add it to an
//! [`OptimizationPipeline`]:
//!
//! ```rust
//! use tqc_compile::{OptimizationPass, OptimizationPipeline};
//! use tqc_ir::Instruction;
//!
//! struct DropMeasurements;
//!
//! impl OptimizationPass for DropMeasurements {
//!     fn name(&self) -> &str { "drop_measurements" }
//!
//!     fn run(&self, gates: Vec<Instruction>) -> Vec<Instruction> {
//!         gates.into_iter().filter(|g| !g.is_measure()).collect()
//!     }
//! }
//!
//! let mut pipeline = OptimizationPipeline::new();
//! pipeline.add_pass(DropMeasurements);
//! assert_eq!(pipeline.len(), 1);
//! ```

pub mod approx;
pub mod braid_to_gate;
pub mod error;
pub mod exact;
pub mod gate_to_braid;
pub mod manager;
pub mod optimize;
pub mod options;
pub mod pass;
pub mod result;
pub mod transpile;
pub mod unitary;

#[cfg(test)]
mod testing;

pub use approx::{Approximation, ApproximationSearch, BaseSet, BraidLetter, base_set};
pub use braid_to_gate::{BraidToGateCompiler, compile_to_gates};
pub use error::{CompileError, CompileResult, ErrorCategory};
pub use exact::{ExactGateMapper, ExactMapping};
pub use gate_to_braid::{GateToBraidCompiler, compile_gate_sequence};
pub use manager::OptimizationPipeline;
pub use optimize::{OptimizationStats, optimize, optimize_with_stats};
pub use options::{BraidToGateOptions, CompileOptions, SearchConfig};
pub use pass::OptimizationPass;
pub use result::{CompilationResult, GateDecomposition};
pub use transpile::{TranspileRules, Transpiler};
pub use unitary::Unitary2x2;
