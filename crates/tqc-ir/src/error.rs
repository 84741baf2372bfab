//! Error types for the IR crate.

use crate::qubit::QubitId;
use thiserror::Error;

/// Errors raised while constructing IR values.
///
/// Every variant describes malformed input; none of them depend on the
/// anyon model a value is later compiled for.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Gate requires a different number of qubits.
    #[error("Gate '{gate_name}' requires {expected} qubits, got {got}")]
    QubitCountMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Expected number of qubits.
        expected: u32,
        /// Actual number of qubits provided.
        got: u32,
    },

    /// Duplicate qubit in operation.
    #[error("Duplicate qubit {qubit} in operation{}", format_gate_context(.gate_name))]
    DuplicateQubit {
        /// The duplicate qubit.
        qubit: QubitId,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Qubit index beyond the sequence width.
    #[error("Qubit {qubit} out of range for a {num_qubits}-qubit sequence{}", format_gate_context(.gate_name))]
    QubitOutOfRange {
        /// The offending qubit.
        qubit: QubitId,
        /// Width of the sequence.
        num_qubits: u32,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Multi-controlled gate without controls.
    #[error("Gate '{gate_name}' needs at least one control qubit")]
    MissingControls {
        /// Name of the gate.
        gate_name: String,
    },

    /// A braid word needs at least two strands.
    #[error("Braid word needs at least 2 strands, got {0}")]
    TooFewStrands(u32),

    /// A generator crosses strands that do not exist.
    #[error("Generator index {index} out of range for {strand_count} strands (max {})", .strand_count.saturating_sub(2))]
    StrandIndexOutOfRange {
        /// Generator index.
        index: u32,
        /// Strand count of the word.
        strand_count: u32,
    },
}

/// Helper function to format optional gate context.
#[allow(clippy::ref_option)]
fn format_gate_context(gate_name: &Option<String>) -> String {
    match gate_name {
        Some(name) => format!(" (gate: {name})"),
        None => String::new(),
    }
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
