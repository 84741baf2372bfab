//! Lowering of composite gates to the elementary braid vocabulary.
//!
//! The elementary vocabulary is {I, H, X, Y, Z, S, S†, T, T†, Rx, Ry, Rz, P,
//! CX} plus measurement and barriers. Composite gates are rewritten by fixed
//! rules, and the rule set is re-applied until no composite gate remains.
//! Every rule output has a strictly smaller compositeness depth than its
//! input, so the number of passes is bounded by the initial maximum depth.

use std::f64::consts::PI;

use tracing::{debug, info, instrument};

use tqc_ir::{AnyonType, GateSequence, Instruction, InstructionKind, QubitId, StandardGate};

use crate::error::{CompileError, CompileResult};

/// Optional lowering rules, enabled per backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TranspileRules {
    /// Lower a user-facing CP(θ) into P and CX gates.
    pub controlled_phase: bool,
}

impl TranspileRules {
    /// The rules available when targeting `anyon`.
    pub fn for_anyon(anyon: AnyonType) -> Self {
        match anyon {
            AnyonType::Ising => Self {
                controlled_phase: true,
            },
            AnyonType::Fibonacci => Self {
                controlled_phase: false,
            },
        }
    }
}

/// Fixed-point lowering of composite gates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Transpiler {
    rules: TranspileRules,
}

impl Transpiler {
    /// Create a transpiler with explicit rules.
    pub fn new(rules: TranspileRules) -> Self {
        Self { rules }
    }

    /// Create a transpiler with the rules of `anyon`'s backend.
    pub fn for_anyon(anyon: AnyonType) -> Self {
        Self::new(TranspileRules::for_anyon(anyon))
    }

    /// The active rules.
    pub fn rules(&self) -> TranspileRules {
        self.rules
    }

    /// Check if an instruction is already in the elementary vocabulary.
    pub fn is_elementary(inst: &Instruction) -> bool {
        Self::compositeness_depth(inst) == 0 && !inst.is_reset()
    }

    /// How many lowering passes an instruction needs at most.
    pub fn compositeness_depth(inst: &Instruction) -> usize {
        match &inst.kind {
            InstructionKind::Gate(gate) => match gate {
                StandardGate::CZ | StandardGate::Swap | StandardGate::CP(_) => 1,
                StandardGate::CCX => 2,
                StandardGate::MCZ { controls } => *controls as usize + 1,
                _ => 0,
            },
            InstructionKind::Measure | InstructionKind::Barrier | InstructionKind::Reset => 0,
        }
    }

    /// Lower a gate list to the elementary vocabulary.
    ///
    /// # Errors
    ///
    /// - [`CompileError::Ir`] when an instruction has the wrong operand count
    /// - [`CompileError::Logic`] for Reset
    /// - [`CompileError::UnsupportedGate`] when a composite gate has no rule
    /// - [`CompileError::TranspilationDiverged`] if the pass cap is hit
    #[instrument(skip(self, gates))]
    pub fn transpile(&self, gates: &[Instruction]) -> CompileResult<Vec<Instruction>> {
        for inst in gates {
            inst.validate_arity()?;
        }
        if let Some(reset) = gates.iter().find(|g| g.is_reset()) {
            return Err(CompileError::logic(
                reset.name(),
                "reset is non-unitary and has no braid realization",
            ));
        }

        let max_passes = gates.iter().map(Self::compositeness_depth).max().unwrap_or(0);
        info!(
            "Transpiling {} instructions, max compositeness depth {}",
            gates.len(),
            max_passes
        );

        let mut current = gates.to_vec();
        let mut passes = 0;

        while current.iter().any(|g| !Self::is_elementary(g)) {
            let mut progress = false;
            let mut next = Vec::with_capacity(current.len());
            for inst in &current {
                match self.lower(inst) {
                    Some(replacement) => {
                        progress = true;
                        next.extend(replacement);
                    }
                    None => next.push(inst.clone()),
                }
            }

            if !progress {
                let stuck = current
                    .iter()
                    .find(|g| !Self::is_elementary(g))
                    .map_or("unknown", Instruction::name);
                return Err(CompileError::UnsupportedGate {
                    gate: stuck.to_string(),
                    transpiled: true,
                });
            }

            passes += 1;
            debug!("Transpile pass {} produced {} instructions", passes, next.len());
            if passes > max_passes {
                return Err(CompileError::TranspilationDiverged { passes });
            }
            current = next;
        }

        info!(
            "Transpilation completed after {} passes, {} instructions",
            passes,
            current.len()
        );
        Ok(current)
    }

    /// Lower a whole sequence, keeping its width and phase.
    ///
    /// # Errors
    ///
    /// See [`Transpiler::transpile`].
    pub fn transpile_sequence(&self, sequence: &GateSequence) -> CompileResult<GateSequence> {
        let gates = self.transpile(sequence.gates())?;
        Ok(GateSequence::new(sequence.num_qubits(), gates)?.with_total_phase(sequence.total_phase()))
    }

    /// Apply one rule to `inst`, or `None` if it is elementary or has no rule.
    fn lower(&self, inst: &Instruction) -> Option<Vec<Instruction>> {
        let gate = inst.as_gate()?;
        match (gate, inst.qubits.as_slice()) {
            (StandardGate::CZ, &[a, b]) => Some(cz(a, b)),
            (StandardGate::Swap, &[a, b]) => Some(vec![cx(a, b), cx(b, a), cx(a, b)]),
            (StandardGate::CP(theta), &[c, t]) if self.rules.controlled_phase => {
                Some(controlled_phase(*theta, c, t))
            }
            (StandardGate::CCX, &[a, b, c]) => Some(toffoli(a, b, c)),
            (StandardGate::MCZ { .. }, q) => {
                let (target, controls) = q.split_last()?;
                Some(multi_controlled_z(controls, *target))
            }
            _ => None,
        }
    }
}

fn g1(gate: StandardGate, q: QubitId) -> Instruction {
    Instruction::single_qubit_gate(gate, q)
}

fn cx(control: QubitId, target: QubitId) -> Instruction {
    Instruction::two_qubit_gate(StandardGate::CX, control, target)
}

fn cz(a: QubitId, b: QubitId) -> Vec<Instruction> {
    vec![g1(StandardGate::H, b), cx(a, b), g1(StandardGate::H, b)]
}

/// CP(θ) = P(θ/2)c · CX · P(−θ/2)t · CX · P(θ/2)t
fn controlled_phase(theta: f64, control: QubitId, target: QubitId) -> Vec<Instruction> {
    vec![
        g1(StandardGate::P(theta / 2.0), control),
        cx(control, target),
        g1(StandardGate::P(-theta / 2.0), target),
        cx(control, target),
        g1(StandardGate::P(theta / 2.0), target),
    ]
}

/// Standard 15-gate Toffoli over {H, T, T†, CX}.
fn toffoli(a: QubitId, b: QubitId, c: QubitId) -> Vec<Instruction> {
    use StandardGate::{H, T, Tdg};
    vec![
        g1(H, c),
        cx(b, c),
        g1(Tdg, c),
        cx(a, c),
        g1(T, c),
        cx(b, c),
        g1(Tdg, c),
        cx(a, c),
        g1(T, b),
        g1(T, c),
        g1(H, c),
        cx(a, b),
        g1(T, a),
        g1(Tdg, b),
        cx(a, b),
    ]
}

fn multi_controlled_z(controls: &[QubitId], target: QubitId) -> Vec<Instruction> {
    match controls {
        [c] => vec![Instruction::two_qubit_gate(StandardGate::CZ, *c, target)],
        [c1, c2] => vec![
            g1(StandardGate::H, target),
            Instruction::gate(StandardGate::CCX, [*c1, *c2, target]),
            g1(StandardGate::H, target),
        ],
        _ => multi_controlled_phase(PI, controls, target),
    }
}

/// Multi-controlled X on `target`, one level deep.
fn multi_controlled_x(controls: &[QubitId], target: QubitId) -> Vec<Instruction> {
    match controls {
        [c] => vec![cx(*c, target)],
        [c1, c2] => vec![Instruction::gate(StandardGate::CCX, [*c1, *c2, target])],
        _ => {
            let mut qubits = controls.to_vec();
            qubits.push(target);
            let m = u32::try_from(controls.len()).unwrap_or(u32::MAX);
            vec![
                g1(StandardGate::H, target),
                Instruction::gate(StandardGate::MCZ { controls: m }, qubits),
                g1(StandardGate::H, target),
            ]
        }
    }
}

/// Phase θ on the all-ones state of `controls ∪ {target}`.
///
/// Peels the last control:
/// `MCP(θ; c₁..c_k; t) = CP(θ/2; c_k, t) · MCX(c₁..c_{k−1}; c_k) · CP(−θ/2; c_k, t)
///  · MCX(c₁..c_{k−1}; c_k) · MCP(θ/2; c₁..c_{k−1}; t)`.
/// Controlled phases are emitted inline so no CP instruction survives.
fn multi_controlled_phase(theta: f64, controls: &[QubitId], target: QubitId) -> Vec<Instruction> {
    match controls.split_last() {
        None => vec![g1(StandardGate::P(theta), target)],
        Some((last, [])) => {
            if (theta - PI).abs() < f64::EPSILON {
                vec![Instruction::two_qubit_gate(StandardGate::CZ, *last, target)]
            } else {
                controlled_phase(theta, *last, target)
            }
        }
        Some((last, rest)) => {
            let mut out = controlled_phase(theta / 2.0, *last, target);
            out.extend(multi_controlled_x(rest, *last));
            out.extend(controlled_phase(-theta / 2.0, *last, target));
            out.extend(multi_controlled_x(rest, *last));
            out.extend(multi_controlled_phase(theta / 2.0, rest, target));
            out
        }
    }
}
