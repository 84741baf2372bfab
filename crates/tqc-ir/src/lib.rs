//! Topological Quantum Compilation IR
//!
//! This crate provides the value types shared by every stage of the
//! gate/braid compiler: gate sequences on the circuit side, braid words on
//! the anyon side, and the anyon-model oracle that relates the two.
//!
//! # Core Components
//!
//! - **Qubits**: [`QubitId`] addresses a logical qubit
//! - **Gates**: [`StandardGate`] is the closed gate set; [`Instruction`] combines
//!   a gate (or measure/barrier/reset) with its operands
//! - **Sequences**: [`GateSequence`] is an immutable circuit with derived depth
//!   and T-count
//! - **Braids**: [`BraidGenerator`] and [`BraidWord`] describe strand crossings
//! - **Anyons**: [`AnyonType`] names a model; [`AnyonModel`] exposes its fusion
//!   rules, R-matrix phases and F-move
//!
//! # Encoding Convention
//!
//! `n` qubits live on `n + 1` strands. Generator σ_i crosses strands `i` and
//! `i + 1` and acts on qubit `i`.
//!
//! # Example: Building a Sequence
//!
//! ```rust
//! use tqc_ir::{GateSequence, Instruction, QubitId, StandardGate};
//!
//! let seq = GateSequence::new(
//!     2,
//!     vec![
//!         Instruction::single_qubit_gate(StandardGate::H, QubitId(0)),
//!         Instruction::single_qubit_gate(StandardGate::T, QubitId(1)),
//!         Instruction::two_qubit_gate(StandardGate::CX, QubitId(0), QubitId(1)),
//!     ],
//! )
//! .unwrap();
//!
//! assert_eq!(seq.depth(), 2); // H and T share a layer
//! assert_eq!(seq.t_count(), 1);
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `I`, `H`, `X`, `Y`, `Z` | 1 | Identity, Hadamard, Paulis |
//! | `S`, `Sdg`, `T`, `Tdg` | 1 | Phase gates |
//! | `Rx`, `Ry`, `Rz`, `P` | 1 | Rotations and phase |
//! | `CX`, `CZ`, `Swap`, `CP` | 2 | Two-qubit gates |
//! | `CCX` | 3 | Toffoli |
//! | `MCZ` | k+1 | Multi-controlled Z |

pub mod anyon;
pub mod braid;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;
pub mod sequence;

pub use anyon::{AnyonModel, AnyonType, Charge, normalize_angle};
pub use braid::{BraidGenerator, BraidWord, Orientation};
pub use error::{IrError, IrResult};
pub use gate::StandardGate;
pub use instruction::{Instruction, InstructionKind};
pub use qubit::QubitId;
pub use sequence::{GateSequence, dependency_depth, t_count};
