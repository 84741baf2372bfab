//! Exact gate/braid translation for models with diagonal braid phases.
//!
//! Under the Ising model one clockwise exchange of an encoding pair applies
//! the relative phase `φ₀ = π/2` to the qubit it encodes, i.e. an S gate.
//! Any gate whose relative phase is `n·φ₀` is therefore a word of `|n|`
//! generators on that pair, clockwise when `n > 0`.

use tracing::debug;

use tqc_ir::{
    AnyonModel, AnyonType, BraidGenerator, BraidWord, Instruction, Orientation, QubitId,
    StandardGate, normalize_angle,
};

use crate::error::{CompileError, CompileResult};
use crate::options::check_tolerance;

/// Tolerance used to decide that a fixed phase lies on the braid lattice.
const LATTICE_EPSILON: f64 = 1e-10;

/// Residuals below this are numerical noise and are reported as 0.
const RESIDUAL_FLOOR: f64 = 1e-12;

/// A braid word produced by the exact mapper together with its angle residual.
#[derive(Debug, Clone, PartialEq)]
pub struct ExactMapping {
    /// The braid realizing the gate.
    pub word: BraidWord,
    /// `|θ − n·φ₀|`; zero for gates that lie on the lattice.
    pub error: f64,
}

/// Zero-error translation between diagonal single-qubit gates and braids.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExactGateMapper {
    anyon: AnyonType,
    fundamental_phase: f64,
}

impl ExactGateMapper {
    /// Create a mapper for `anyon`, or `None` if its braids never realize
    /// gates exactly.
    pub fn for_anyon(anyon: AnyonType) -> Option<Self> {
        if !anyon.has_exact_phase_braids() {
            return None;
        }
        Some(Self {
            anyon,
            fundamental_phase: anyon.relative_braid_phase(),
        })
    }

    /// The anyon model this mapper serves.
    pub fn anyon_type(&self) -> AnyonType {
        self.anyon
    }

    /// Relative phase applied by one clockwise exchange.
    pub fn fundamental_phase(&self) -> f64 {
        self.fundamental_phase
    }

    /// Map a single-qubit gate on `qubit` to a braid word on `strand_count` strands.
    ///
    /// Fixed-phase gates must lie exactly on the lattice `n·φ₀`. Rz and P are
    /// rounded to the nearest lattice point and succeed when the residual is
    /// within `tolerance`.
    ///
    /// # Errors
    ///
    /// - [`CompileError::ExactMappingUnavailable`] for non-diagonal gates and
    ///   fixed phases off the lattice (T, T†)
    /// - [`CompileError::ToleranceExceeded`] when an Rz/P residual is too large
    /// - [`CompileError::Ir`] when `qubit` has no strand pair in `strand_count`
    /// - [`CompileError::Validation`] for a NaN, infinite or negative `tolerance`
    pub fn map_gate_to_braid(
        &self,
        gate: &StandardGate,
        qubit: QubitId,
        strand_count: u32,
        tolerance: f64,
    ) -> CompileResult<ExactMapping> {
        check_tolerance(tolerance)?;
        let unavailable = || CompileError::ExactMappingUnavailable {
            gate: gate.name().to_string(),
        };
        let phase = gate.diagonal_phase().ok_or_else(unavailable)?;

        let (count, error) = match gate {
            StandardGate::Rz(_) | StandardGate::P(_) => {
                let (count, residual) = self.round_to_lattice(phase);
                let error = if residual.abs() < RESIDUAL_FLOOR {
                    0.0
                } else {
                    residual.abs()
                };
                if error > tolerance {
                    return Err(CompileError::ToleranceExceeded {
                        gate: gate.name().to_string(),
                        residual: error,
                        tolerance,
                    });
                }
                (count, error)
            }
            _ => {
                let (count, residual) = self.round_to_lattice(phase);
                if residual.abs() > LATTICE_EPSILON {
                    return Err(unavailable());
                }
                (count, 0.0)
            }
        };

        if error > 0.0 {
            debug!("Rounded {} on {} to {} braids, residual {:.3e}", gate, qubit, count, error);
        }

        let orientation = if count > 0 {
            Orientation::Clockwise
        } else {
            Orientation::CounterClockwise
        };
        let generators =
            vec![BraidGenerator::new(qubit.strand_index(), orientation); count.unsigned_abs() as usize];
        let word = BraidWord::new(strand_count, generators)?;

        Ok(ExactMapping { word, error })
    }

    /// Map one generator to the gate it realizes exactly.
    pub fn map_generator_to_gate(&self, generator: BraidGenerator) -> Instruction {
        let gate = match generator.orientation {
            Orientation::Clockwise => StandardGate::S,
            Orientation::CounterClockwise => StandardGate::Sdg,
        };
        Instruction::single_qubit_gate(gate, QubitId(generator.index))
    }

    /// Round `theta` to the nearest multiple of `φ₀`, returning the multiple
    /// and the residual in `(−φ₀/2, φ₀/2]`.
    #[allow(clippy::cast_possible_truncation)]
    fn round_to_lattice(&self, theta: f64) -> (i64, f64) {
        let phi = self.fundamental_phase;
        let theta = normalize_angle(theta);
        let mut count = (theta / phi).round() as i64;
        let mut residual = theta - count as f64 * phi;
        if residual <= -phi / 2.0 {
            count -= 1;
            residual += phi;
        } else if residual > phi / 2.0 {
            count += 1;
            residual -= phi;
        }
        (count, residual)
    }
}
