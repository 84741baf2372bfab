//! Adjacent inverse cancellation.

use tqc_ir::{Instruction, QubitId, StandardGate};

use crate::pass::OptimizationPass;

/// Check if `b` undoes `a` on the same qubits.
///
/// Gates that are symmetric in their operands (CZ, SWAP, CP, MCZ, and the
/// controls of CCX) match regardless of operand order.
pub(crate) fn are_inverse(a: &Instruction, b: &Instruction) -> bool {
    let (Some(ga), Some(gb)) = (a.as_gate(), b.as_gate()) else {
        return false;
    };
    if !ga.inverse().approx_eq(gb) {
        return false;
    }
    same_operands(ga, &a.qubits, &b.qubits)
}

fn same_operands(gate: &StandardGate, a: &[QubitId], b: &[QubitId]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    match gate {
        StandardGate::CZ | StandardGate::Swap | StandardGate::CP(_) | StandardGate::MCZ { .. } => {
            a.iter().all(|q| b.contains(q))
        }
        StandardGate::CCX => match (a, b) {
            ([a0, a1, at], [b0, b1, bt]) => {
                at == bt && ((a0 == b0 && a1 == b1) || (a0 == b1 && a1 == b0))
            }
            _ => false,
        },
        _ => a == b,
    }
}

fn is_identity(inst: &Instruction) -> bool {
    matches!(inst.as_gate(), Some(StandardGate::I))
}

/// Remove identities and adjacent inverse pairs in one left-to-right pass.
///
/// Cancellations cascade: `S T T† S†` empties completely.
pub fn cancel_inverses(gates: Vec<Instruction>) -> Vec<Instruction> {
    let mut stack: Vec<Instruction> = Vec::with_capacity(gates.len());
    for inst in gates {
        if is_identity(&inst) {
            continue;
        }
        if stack.last().is_some_and(|top| are_inverse(top, &inst)) {
            stack.pop();
        } else {
            stack.push(inst);
        }
    }
    stack
}

/// Inverse-cancellation pass.
pub struct CancelInverses;

impl OptimizationPass for CancelInverses {
    fn name(&self) -> &'static str {
        "CancelInverses"
    }

    fn run(&self, gates: Vec<Instruction>) -> Vec<Instruction> {
        cancel_inverses(gates)
    }
}
