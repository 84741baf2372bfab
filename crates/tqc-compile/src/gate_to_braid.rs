//! Gate sequence to braid compilation.

use tracing::{debug, info, instrument, warn};

use tqc_ir::{
    AnyonType, BraidGenerator, BraidWord, GateSequence, Instruction, InstructionKind, QubitId,
    StandardGate,
};

use crate::approx::ApproximationSearch;
use crate::error::{CompileError, CompileResult};
use crate::exact::ExactGateMapper;
use crate::options::CompileOptions;
use crate::result::{CompilationResult, GateDecomposition};
use crate::transpile::Transpiler;

/// Compile `sequence` for `anyon_type`, accepting per-gate errors up to `tolerance`.
///
/// # Errors
///
/// See [`GateToBraidCompiler::compile`].
pub fn compile_gate_sequence(
    sequence: &GateSequence,
    tolerance: f64,
    anyon_type: AnyonType,
) -> CompileResult<CompilationResult> {
    GateToBraidCompiler::new(CompileOptions::new(anyon_type).with_tolerance(tolerance))
        .compile(sequence)
}

/// A braid fragment: generators, strand count and accumulated error.
struct Fragment {
    generators: Vec<BraidGenerator>,
    strand_count: u32,
    error: f64,
    notes: Vec<String>,
}

impl Fragment {
    fn empty(strand_count: u32) -> Self {
        Self {
            generators: Vec::new(),
            strand_count,
            error: 0.0,
            notes: Vec::new(),
        }
    }

    fn append(&mut self, other: Fragment) {
        self.generators.extend(other.generators);
        self.strand_count = self.strand_count.max(other.strand_count);
        self.error += other.error;
        self.notes.extend(other.notes);
    }
}

/// Compiles gate sequences into braid words for one anyon model.
#[derive(Debug, Clone, Copy)]
pub struct GateToBraidCompiler {
    options: CompileOptions,
    transpiler: Transpiler,
    exact: Option<ExactGateMapper>,
    search: ApproximationSearch,
}

impl GateToBraidCompiler {
    /// Create a compiler.
    pub fn new(options: CompileOptions) -> Self {
        let anyon = options.anyon_type;
        Self {
            options,
            transpiler: Transpiler::for_anyon(anyon),
            exact: ExactGateMapper::for_anyon(anyon),
            search: ApproximationSearch::new(anyon),
        }
    }

    /// The active options.
    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Transpile `sequence` and compile every resulting instruction.
    ///
    /// # Errors
    ///
    /// - [`CompileError::Validation`] for a NaN, infinite or negative tolerance
    /// - [`CompileError::Ir`] for an instruction with the wrong operand count
    ///   or a qubit outside the sequence
    /// - [`CompileError::Logic`] for Reset and for two-qubit gates the model
    ///   has no braid for
    /// - [`CompileError::UnsupportedGate`] when lowering gets stuck
    /// - [`CompileError::ToleranceExceeded`] / [`CompileError::Computation`]
    ///   when a gate cannot be met within tolerance
    #[instrument(skip(self, sequence), fields(anyon = %self.options.anyon_type))]
    pub fn compile(&self, sequence: &GateSequence) -> CompileResult<CompilationResult> {
        info!(
            "Compiling {} instructions on {} qubits, tolerance {:.3e}",
            sequence.len(),
            sequence.num_qubits(),
            self.options.tolerance
        );

        self.options.validate()?;
        let elementary = self.transpiler.transpile(sequence.gates())?;
        let decompositions = elementary
            .iter()
            .map(|inst| self.compile_instruction(inst, sequence.num_qubits()))
            .collect::<CompileResult<Vec<_>>>()?;

        let result = CompilationResult::new(
            self.options.anyon_type,
            sequence.len(),
            decompositions,
        );
        info!(
            "Compiled to {} braids ({} generators), total error {:.3e}",
            result.compiled_braids.len(),
            result.braid_length(),
            result.total_error
        );
        Ok(result)
    }

    /// Compile one instruction of a `num_qubits`-wide sequence.
    ///
    /// Composite gates are lowered first and compiled into a single
    /// decomposition.
    ///
    /// # Errors
    ///
    /// See [`GateToBraidCompiler::compile`].
    pub fn compile_instruction(
        &self,
        inst: &Instruction,
        num_qubits: u32,
    ) -> CompileResult<GateDecomposition> {
        self.options.validate()?;
        inst.validate(num_qubits)?;
        let fragment = self.compile_fragment(inst, base_strand_count(num_qubits))?;
        Ok(GateDecomposition {
            name: match &inst.kind {
                InstructionKind::Gate(gate) => gate.to_string(),
                _ => inst.name().to_string(),
            },
            qubits: inst.qubits.clone(),
            braid: BraidWord::new(fragment.strand_count, fragment.generators)?,
            approximation_error: fragment.error,
            notes: fragment.notes,
        })
    }

    fn compile_fragment(&self, inst: &Instruction, strand_count: u32) -> CompileResult<Fragment> {
        // Operand indexing below relies on this.
        inst.validate_arity()?;
        let gate = match &inst.kind {
            InstructionKind::Measure | InstructionKind::Barrier => {
                return Ok(Fragment::empty(strand_count));
            }
            InstructionKind::Reset => {
                return Err(CompileError::logic(
                    inst.name(),
                    "reset is non-unitary and has no braid realization",
                ));
            }
            InstructionKind::Gate(gate) => gate,
        };

        let q = &inst.qubits;
        match (self.options.anyon_type, gate) {
            (
                _,
                StandardGate::I
                | StandardGate::H
                | StandardGate::X
                | StandardGate::Y
                | StandardGate::Z
                | StandardGate::S
                | StandardGate::Sdg
                | StandardGate::T
                | StandardGate::Tdg
                | StandardGate::Rx(_)
                | StandardGate::Ry(_)
                | StandardGate::Rz(_)
                | StandardGate::P(_),
            ) => self.compile_single(gate, q[0], strand_count),
            (_, StandardGate::CX) => self.compile_cnot(q[0], q[1], strand_count),
            (_, StandardGate::CZ | StandardGate::Swap | StandardGate::CCX | StandardGate::MCZ { .. })
            | (AnyonType::Ising, StandardGate::CP(_)) => self.compile_lowered(inst, strand_count),
            (AnyonType::Fibonacci, StandardGate::CP(_)) => Err(CompileError::logic(
                gate.name(),
                "Fibonacci braids have no controlled-phase rule",
            )),
        }
    }

    /// Single-qubit gate: exact when the model allows it, approximated otherwise.
    fn compile_single(
        &self,
        gate: &StandardGate,
        qubit: QubitId,
        strand_count: u32,
    ) -> CompileResult<Fragment> {
        let tolerance = self.options.tolerance;

        if let Some(mapper) = &self.exact {
            match mapper.map_gate_to_braid(gate, qubit, strand_count, tolerance) {
                Ok(mapping) => {
                    let mut notes = Vec::new();
                    if mapping.error > 0.0 {
                        notes.push(format!(
                            "{gate} on {qubit} rounded to {} braids, residual {:.3e}",
                            mapping.word.len(),
                            mapping.error
                        ));
                    }
                    return Ok(Fragment {
                        generators: mapping.word.generators().to_vec(),
                        strand_count,
                        error: mapping.error,
                        notes,
                    });
                }
                Err(CompileError::ExactMappingUnavailable { .. }) => {
                    debug!("No exact braid for {} on {}, approximating", gate, qubit);
                }
                Err(e) => return Err(e),
            }
        }

        let approx = self
            .search
            .approximate_gate(gate, tolerance, self.options.search)?;
        if approx.error > tolerance {
            warn!(
                "Best braid for {} within length {} misses by {:.3e} (tolerance {:.3e})",
                gate, self.options.search.max_length, approx.error, tolerance
            );
            return Err(CompileError::Computation {
                gate: gate.name().to_string(),
                error: approx.error,
                tolerance,
            });
        }

        // The approximating word crosses strands q..=q+2.
        let strand_count = strand_count.max(qubit.strand_index() + 3);
        let word = approx.to_braid_word(qubit, strand_count)?;
        Ok(Fragment {
            generators: word.generators().to_vec(),
            strand_count,
            error: approx.error,
            notes: vec![format!(
                "{gate} on {qubit} approximated by {} braids, error {:.3e}",
                approx.len(),
                approx.error
            )],
        })
    }

    /// CX: target-basis change around a full twist of the control and target pairs.
    fn compile_cnot(
        &self,
        control: QubitId,
        target: QubitId,
        strand_count: u32,
    ) -> CompileResult<Fragment> {
        let hadamard = self.compile_single(&StandardGate::H, target, strand_count)?;

        let lo = control.strand_index().min(target.strand_index());
        let hi = control.strand_index().max(target.strand_index());
        let mut weave: Vec<BraidGenerator> = (lo..hi).map(BraidGenerator::clockwise).collect();
        weave.push(BraidGenerator::clockwise(hi));
        weave.push(BraidGenerator::clockwise(hi));
        weave.extend((lo..hi).rev().map(BraidGenerator::counter_clockwise));

        let mut fragment = Fragment {
            generators: hadamard.generators.clone(),
            strand_count: hadamard.strand_count,
            error: hadamard.error,
            notes: hadamard.notes.clone(),
        };
        fragment.append(Fragment {
            generators: weave,
            strand_count,
            error: 0.0,
            notes: Vec::new(),
        });
        fragment.append(hadamard);
        Ok(fragment)
    }

    /// Lower a composite gate and concatenate the braids of its pieces.
    fn compile_lowered(&self, inst: &Instruction, strand_count: u32) -> CompileResult<Fragment> {
        let pieces = self.transpiler.transpile(std::slice::from_ref(inst))?;
        let mut fragment = Fragment::empty(strand_count);
        for piece in &pieces {
            fragment.append(self.compile_fragment(piece, strand_count)?);
        }
        Ok(fragment)
    }
}

/// Strands needed for `num_qubits` under the n+1 convention.
fn base_strand_count(num_qubits: u32) -> u32 {
    (num_qubits + 1).max(2)
}
