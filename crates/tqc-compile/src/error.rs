//! Error types for the compilation crate.

use thiserror::Error;

/// Coarse classification of a [`CompileError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Malformed input: bad arity, index out of range, unsupported search length.
    Validation,
    /// The operation has no meaning in the braid model.
    Logic,
    /// A numeric residual exceeded the caller's tolerance.
    Computation,
    /// The gate is not natively exact; callers should try approximation.
    ExactMappingUnavailable,
}

/// Errors that can occur during compilation.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum CompileError {
    /// Error from the IR crate.
    #[error("IR error: {0}")]
    Ir(#[from] tqc_ir::IrError),

    /// Invalid request to the compiler itself.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// The gate cannot be expressed in the braid model at all.
    #[error("Gate '{gate}' is not supported: {reason}")]
    Logic {
        /// Offending gate name.
        gate: String,
        /// Why it was rejected.
        reason: String,
    },

    /// An approximation could not meet the requested tolerance.
    #[error("Approximation of '{gate}' has error {error:.3e}, above tolerance {tolerance:.3e}")]
    Computation {
        /// Offending gate name.
        gate: String,
        /// Best error found.
        error: f64,
        /// Requested tolerance.
        tolerance: f64,
    },

    /// The gate's phase is not a multiple of the fundamental braid phase.
    #[error("No exact braid for gate '{gate}'")]
    ExactMappingUnavailable {
        /// Offending gate name.
        gate: String,
    },

    /// Rounding a continuous angle to the braid lattice left too large a residual.
    #[error("Rounding '{gate}' to the braid lattice leaves residual {residual:.3e}, above tolerance {tolerance:.3e}")]
    ToleranceExceeded {
        /// Offending gate name.
        gate: String,
        /// Angle residual after rounding.
        residual: f64,
        /// Requested tolerance.
        tolerance: f64,
    },

    /// A composite gate survived lowering, or a gate has no braid rule.
    #[error("{}", unsupported_message(gate, *transpiled))]
    UnsupportedGate {
        /// Offending gate name.
        gate: String,
        /// True when the gate was still present after transpilation.
        transpiled: bool,
    },

    /// Lowering did not reach a fixed point within its iteration cap.
    #[error("Transpilation did not converge after {passes} passes")]
    TranspilationDiverged {
        /// Passes run before giving up.
        passes: usize,
    },
}

fn unsupported_message(gate: &str, transpiled: bool) -> String {
    if transpiled {
        format!("Gate '{gate}' is not supported even after being transpiled")
    } else {
        format!("Gate '{gate}' is not natively supported")
    }
}

impl CompileError {
    /// Classify this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            CompileError::Ir(_) | CompileError::Validation(_) => ErrorCategory::Validation,
            CompileError::Logic { .. }
            | CompileError::UnsupportedGate { .. }
            | CompileError::TranspilationDiverged { .. } => ErrorCategory::Logic,
            CompileError::Computation { .. } | CompileError::ToleranceExceeded { .. } => {
                ErrorCategory::Computation
            }
            CompileError::ExactMappingUnavailable { .. } => ErrorCategory::ExactMappingUnavailable,
        }
    }

    /// Build a [`CompileError::Logic`].
    pub fn logic(gate: impl Into<String>, reason: impl Into<String>) -> Self {
        CompileError::Logic {
            gate: gate.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for compilation operations.
pub type CompileResult<T> = Result<T, CompileError>;
