//! Circuit instructions combining gates with operands.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{IrError, IrResult};
use crate::gate::StandardGate;
use crate::qubit::QubitId;

/// The kind of instruction in a gate sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InstructionKind {
    /// A unitary gate.
    Gate(StandardGate),
    /// Measurement in the computational basis.
    Measure,
    /// Barrier (synchronization point). An empty qubit list spans every qubit.
    Barrier,
    /// Reset qubit to |0⟩. Non-unitary, so it never compiles to a braid.
    Reset,
}

/// A complete instruction with operands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    /// The kind of instruction.
    pub kind: InstructionKind,
    /// Qubits this instruction operates on.
    pub qubits: Vec<QubitId>,
}

impl Instruction {
    /// Create a gate instruction.
    ///
    /// Operands are not checked here; [`Instruction::validate`] (called by
    /// [`crate::GateSequence::new`]) rejects malformed ones.
    pub fn gate(gate: StandardGate, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: InstructionKind::Gate(gate),
            qubits: qubits.into_iter().collect(),
        }
    }

    /// Create a single-qubit gate instruction.
    pub fn single_qubit_gate(gate: StandardGate, qubit: QubitId) -> Self {
        Self::gate(gate, [qubit])
    }

    /// Create a two-qubit gate instruction.
    pub fn two_qubit_gate(gate: StandardGate, q1: QubitId, q2: QubitId) -> Self {
        Self::gate(gate, [q1, q2])
    }

    /// Create a measurement instruction.
    pub fn measure(qubit: QubitId) -> Self {
        Self {
            kind: InstructionKind::Measure,
            qubits: vec![qubit],
        }
    }

    /// Create a reset instruction.
    pub fn reset(qubit: QubitId) -> Self {
        Self {
            kind: InstructionKind::Reset,
            qubits: vec![qubit],
        }
    }

    /// Create a barrier instruction.
    pub fn barrier(qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: InstructionKind::Barrier,
            qubits: qubits.into_iter().collect(),
        }
    }

    /// Create a barrier spanning every qubit of the sequence.
    pub fn barrier_all() -> Self {
        Self {
            kind: InstructionKind::Barrier,
            qubits: Vec::new(),
        }
    }

    /// Check that the operand count matches the instruction.
    ///
    /// Gates take exactly [`StandardGate::num_qubits`] operands, Measure and
    /// Reset take one, and a barrier takes any number.
    pub fn validate_arity(&self) -> IrResult<()> {
        let name = self.name();

        if let InstructionKind::Gate(gate) = &self.kind {
            if let StandardGate::MCZ { controls: 0 } = gate {
                return Err(IrError::MissingControls {
                    gate_name: name.to_string(),
                });
            }
            let got = u32::try_from(self.qubits.len()).unwrap_or(u32::MAX);
            if got != gate.num_qubits() {
                return Err(IrError::QubitCountMismatch {
                    gate_name: name.to_string(),
                    expected: gate.num_qubits(),
                    got,
                });
            }
        } else if !self.is_barrier() && self.qubits.len() != 1 {
            return Err(IrError::QubitCountMismatch {
                gate_name: name.to_string(),
                expected: 1,
                got: u32::try_from(self.qubits.len()).unwrap_or(u32::MAX),
            });
        }
        Ok(())
    }

    /// Check operand arity, distinctness and range against a sequence width.
    pub fn validate(&self, num_qubits: u32) -> IrResult<()> {
        self.validate_arity()?;
        let name = self.name();

        for (i, qubit) in self.qubits.iter().enumerate() {
            if qubit.0 >= num_qubits {
                return Err(IrError::QubitOutOfRange {
                    qubit: *qubit,
                    num_qubits,
                    gate_name: Some(name.to_string()),
                });
            }
            if self.qubits[..i].contains(qubit) {
                return Err(IrError::DuplicateQubit {
                    qubit: *qubit,
                    gate_name: Some(name.to_string()),
                });
            }
        }

        Ok(())
    }

    /// Check if this is a gate instruction.
    pub fn is_gate(&self) -> bool {
        matches!(self.kind, InstructionKind::Gate(_))
    }

    /// Check if this is a measurement.
    pub fn is_measure(&self) -> bool {
        matches!(self.kind, InstructionKind::Measure)
    }

    /// Check if this is a reset.
    pub fn is_reset(&self) -> bool {
        matches!(self.kind, InstructionKind::Reset)
    }

    /// Check if this is a barrier.
    pub fn is_barrier(&self) -> bool {
        matches!(self.kind, InstructionKind::Barrier)
    }

    /// Get the gate if this is a gate instruction.
    pub fn as_gate(&self) -> Option<&StandardGate> {
        match &self.kind {
            InstructionKind::Gate(g) => Some(g),
            _ => None,
        }
    }

    /// Check if this is a T or T-dagger gate.
    pub fn is_t_gate(&self) -> bool {
        self.as_gate().is_some_and(StandardGate::is_t_gate)
    }

    /// Check if two instructions share at least one qubit.
    ///
    /// A barrier with no explicit qubits spans every qubit.
    pub fn overlaps(&self, other: &Instruction) -> bool {
        let spans_all = |inst: &Instruction| inst.is_barrier() && inst.qubits.is_empty();
        if spans_all(self) || spans_all(other) {
            return true;
        }
        self.qubits.iter().any(|q| other.qubits.contains(q))
    }

    /// Get the name of the instruction.
    pub fn name(&self) -> &'static str {
        match &self.kind {
            InstructionKind::Gate(g) => g.name(),
            InstructionKind::Measure => "measure",
            InstructionKind::Barrier => "barrier",
            InstructionKind::Reset => "reset",
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            InstructionKind::Gate(g) => write!(f, "{g}")?,
            _ => f.write_str(self.name())?,
        }
        for (i, qubit) in self.qubits.iter().enumerate() {
            let sep = if i == 0 { " " } else { ", " };
            write!(f, "{sep}{qubit}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_instruction() {
        let inst = Instruction::single_qubit_gate(StandardGate::H, QubitId(0));
        assert!(inst.is_gate());
        assert_eq!(inst.qubits.len(), 1);
        assert_eq!(inst.name(), "h");
        assert_eq!(inst.to_string(), "h q0");
    }

    #[test]
    fn test_validate_arity() {
        let bad = Instruction::gate(StandardGate::CX, [QubitId(0)]);
        assert!(matches!(
            bad.validate(2),
            Err(IrError::QubitCountMismatch { expected: 2, got: 1, .. })
        ));

        let dup = Instruction::two_qubit_gate(StandardGate::CZ, QubitId(1), QubitId(1));
        assert!(matches!(dup.validate(2), Err(IrError::DuplicateQubit { .. })));

        let wide = Instruction::single_qubit_gate(StandardGate::T, QubitId(3));
        assert!(matches!(wide.validate(2), Err(IrError::QubitOutOfRange { .. })));

        let mcz = Instruction::gate(StandardGate::MCZ { controls: 0 }, [QubitId(0)]);
        assert!(matches!(mcz.validate(1), Err(IrError::MissingControls { .. })));
    }

    #[test]
    fn test_arity_ignores_width() {
        let ccx = Instruction::gate(StandardGate::CCX, [QubitId(7), QubitId(8), QubitId(9)]);
        assert!(ccx.validate_arity().is_ok());
        assert!(Instruction::barrier_all().validate_arity().is_ok());

        let short = Instruction::gate(StandardGate::CCX, [QubitId(0), QubitId(1)]);
        assert!(matches!(
            short.validate_arity(),
            Err(IrError::QubitCountMismatch { expected: 3, got: 2, .. })
        ));
        let measure = Instruction {
            kind: InstructionKind::Measure,
            qubits: vec![],
        };
        assert!(measure.validate_arity().is_err());
    }

    #[test]
    fn test_barrier_overlaps_everything_when_empty() {
        let barrier = Instruction::barrier_all();
        let t = Instruction::single_qubit_gate(StandardGate::T, QubitId(5));
        assert!(barrier.overlaps(&t));
        assert!(barrier.validate(1).is_ok());

        let partial = Instruction::barrier([QubitId(0)]);
        assert!(!partial.overlaps(&t));
    }

    #[test]
    fn test_measure_and_reset() {
        assert!(Instruction::measure(QubitId(0)).is_measure());
        assert!(Instruction::reset(QubitId(0)).is_reset());
        assert_eq!(
            Instruction::two_qubit_gate(StandardGate::CX, QubitId(0), QubitId(1)).to_string(),
            "cx q0, q1"
        );
    }
}
