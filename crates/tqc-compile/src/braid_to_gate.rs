//! Braid word to gate sequence compilation.
//!
//! Each generator `σ_q` becomes one phase gate on qubit `q`. Under Ising the
//! gate is S (or S† for a counter-clockwise exchange); under Fibonacci it is
//! `Rz(±θ_R)` with `θ_R` the relative braid phase of the model.

use num_complex::Complex64;
use tracing::{debug, instrument};

use tqc_ir::{
    AnyonModel, AnyonType, BraidGenerator, BraidWord, GateSequence, Instruction, QubitId,
    StandardGate, normalize_angle,
};

use crate::error::CompileResult;
use crate::exact::ExactGateMapper;
use crate::optimize::{OptimizationStats, optimize_with_stats};
use crate::options::BraidToGateOptions;

/// Compile `word` into gates for `anyon_type`.
///
/// # Errors
///
/// See [`BraidToGateCompiler::compile`].
pub fn compile_to_gates(
    word: &BraidWord,
    anyon_type: AnyonType,
    options: &BraidToGateOptions,
) -> CompileResult<GateSequence> {
    BraidToGateCompiler::new(anyon_type, *options).compile(word)
}

/// Translates braid words back into gate sequences.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BraidToGateCompiler {
    anyon: AnyonType,
    options: BraidToGateOptions,
    exact: Option<ExactGateMapper>,
}

impl BraidToGateCompiler {
    /// Create a compiler for `anyon`.
    pub fn new(anyon: AnyonType, options: BraidToGateOptions) -> Self {
        Self {
            anyon,
            options,
            exact: ExactGateMapper::for_anyon(anyon),
        }
    }

    /// The anyon model generators are read under.
    pub fn anyon_type(&self) -> AnyonType {
        self.anyon
    }

    /// The gate realized by one generator.
    pub fn generator_gate(&self, generator: BraidGenerator) -> Instruction {
        if let Some(mapper) = &self.exact {
            return mapper.map_generator_to_gate(generator);
        }
        let theta = self.anyon.relative_braid_phase();
        let theta = if generator.orientation.is_clockwise() {
            theta
        } else {
            -theta
        };
        Instruction::single_qubit_gate(StandardGate::Rz(theta), QubitId(generator.index))
    }

    /// Global phase picked up by `word`: the product of the vacuum-channel
    /// exchange phases of its generators.
    pub fn total_phase(&self, word: &BraidWord) -> Complex64 {
        if word.is_empty() {
            return Complex64::new(1.0, 0.0);
        }
        let angle: f64 = word
            .generators()
            .iter()
            .map(|g| self.anyon.braiding_phase(g.orientation.is_clockwise()).arg())
            .sum();
        Complex64::from_polar(1.0, normalize_angle(angle))
    }

    /// Compile `word` into a sequence on `strand_count − 1` qubits, optimized
    /// at the configured level.
    ///
    /// # Errors
    ///
    /// Returns a validation error if a generated gate falls outside the
    /// qubit range of the word.
    pub fn compile(&self, word: &BraidWord) -> CompileResult<GateSequence> {
        self.compile_with_stats(word).map(|(sequence, _)| sequence)
    }

    /// Like [`BraidToGateCompiler::compile`], also reporting what the
    /// optimizer did.
    ///
    /// # Errors
    ///
    /// See [`BraidToGateCompiler::compile`].
    #[instrument(skip(self, word), fields(anyon = %self.anyon, generators = word.len()))]
    pub fn compile_with_stats(
        &self,
        word: &BraidWord,
    ) -> CompileResult<(GateSequence, OptimizationStats)> {
        let gates: Vec<Instruction> = word
            .generators()
            .iter()
            .map(|g| self.generator_gate(*g))
            .collect();

        let (gates, stats) = optimize_with_stats(gates, self.options.optimization_level);
        debug!(
            "Braid of {} generators -> {} gates at level {}",
            word.len(),
            gates.len(),
            self.options.optimization_level
        );

        let sequence =
            GateSequence::new(word.num_qubits(), gates)?.with_total_phase(self.total_phase(word));
        Ok((sequence, stats))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn word(strands: u32, generators: Vec<BraidGenerator>) -> BraidWord {
        BraidWord::new(strands, generators).unwrap()
    }

    fn gates_of(seq: &GateSequence) -> Vec<StandardGate> {
        seq.gates().iter().filter_map(|i| i.as_gate().copied()).collect()
    }

    #[test]
    fn test_ising_generators() {
        let w = word(
            3,
            vec![BraidGenerator::clockwise(0), BraidGenerator::counter_clockwise(1)],
        );
        let seq = compile_to_gates(&w, AnyonType::Ising, &BraidToGateOptions::new()).unwrap();
        assert_eq!(seq.num_qubits(), 2);
        assert_eq!(seq.gates()[0], Instruction::single_qubit_gate(StandardGate::S, QubitId(0)));
        assert_eq!(seq.gates()[1], Instruction::single_qubit_gate(StandardGate::Sdg, QubitId(1)));
    }

    #[test]
    fn test_ising_double_exchange_merges_to_z() {
        let w = word(2, vec![BraidGenerator::clockwise(0); 2]);
        let raw = compile_to_gates(&w, AnyonType::Ising, &BraidToGateOptions::new()).unwrap();
        assert_eq!(gates_of(&raw), vec![StandardGate::S, StandardGate::S]);

        let options = BraidToGateOptions::new().with_optimization_level(1);
        let merged = compile_to_gates(&w, AnyonType::Ising, &options).unwrap();
        assert_eq!(gates_of(&merged), vec![StandardGate::Z]);
    }

    #[test]
    fn test_fibonacci_rotation_angles() {
        let w = word(
            2,
            vec![BraidGenerator::clockwise(0), BraidGenerator::counter_clockwise(0)],
        );
        let seq = compile_to_gates(&w, AnyonType::Fibonacci, &BraidToGateOptions::new()).unwrap();
        let theta = -3.0 * PI / 5.0;
        match gates_of(&seq).as_slice() {
            [StandardGate::Rz(a), StandardGate::Rz(b)] => {
                assert!((a - theta).abs() < 1e-12);
                assert!((b + theta).abs() < 1e-12);
            }
            other => panic!("unexpected gates {other:?}"),
        }

        let options = BraidToGateOptions::new().with_optimization_level(1);
        let cancelled = compile_to_gates(&w, AnyonType::Fibonacci, &options).unwrap();
        assert!(cancelled.is_empty());
    }

    #[test]
    fn test_total_phase() {
        let empty = word(2, vec![]);
        for anyon in AnyonType::ALL {
            let compiler = BraidToGateCompiler::new(anyon, BraidToGateOptions::new());
            assert_eq!(compiler.total_phase(&empty), Complex64::new(1.0, 0.0));

            let w = word(
                4,
                vec![
                    BraidGenerator::clockwise(0),
                    BraidGenerator::clockwise(2),
                    BraidGenerator::counter_clockwise(1),
                    BraidGenerator::clockwise(0),
                ],
            );
            let phase = compiler.total_phase(&w);
            assert!((phase.norm() - 1.0).abs() < 1e-12);

            // A word and its inverse pick up conjugate phases.
            let back = compiler.total_phase(&w.inverse());
            assert!((phase * back - Complex64::new(1.0, 0.0)).norm() < 1e-12);
        }
    }

    #[test]
    fn test_ising_single_exchange_phase() {
        let w = word(2, vec![BraidGenerator::clockwise(0)]);
        let seq = compile_to_gates(&w, AnyonType::Ising, &BraidToGateOptions::new()).unwrap();
        let expected = Complex64::from_polar(1.0, -PI / 8.0);
        assert!((seq.total_phase() - expected).norm() < 1e-12);
    }

    #[test]
    fn test_depth_counts_parallel_generators_once() {
        let w = word(
            4,
            vec![
                BraidGenerator::clockwise(0),
                BraidGenerator::clockwise(1),
                BraidGenerator::clockwise(2),
            ],
        );
        let seq = compile_to_gates(&w, AnyonType::Ising, &BraidToGateOptions::new()).unwrap();
        assert_eq!(seq.len(), 3);
        assert_eq!(seq.depth(), 1);
    }

    #[test]
    fn test_stats_reported() {
        let w = word(2, vec![BraidGenerator::clockwise(0); 4]);
        let compiler =
            BraidToGateCompiler::new(AnyonType::Ising, BraidToGateOptions::new().with_optimization_level(2));
        let (seq, stats) = compiler.compile_with_stats(&w).unwrap();
        assert!(seq.is_empty());
        assert_eq!(stats.original_gate_count, 4);
        assert_eq!(stats.gates_removed(), 4);
    }
}
