//! Algebraic merging of adjacent single-qubit gates.

use tqc_ir::{Instruction, StandardGate, normalize_angle};

use crate::pass::OptimizationPass;

use super::EPSILON;

/// Outcome of merging two gates.
enum Merged {
    /// The product is the identity up to global phase.
    Removed,
    /// The product is a single gate.
    Gate(StandardGate),
}

/// Merge `first` followed by `second` on the same qubit.
fn merge_pair(first: &StandardGate, second: &StandardGate) -> Option<Merged> {
    use StandardGate::{P, Rx, Ry, Rz, S, Sdg, T, Tdg, Z};
    let merged = match (*first, *second) {
        (T, T) => Merged::Gate(S),
        (Tdg, Tdg) => Merged::Gate(Sdg),
        (S, S) | (Sdg, Sdg) => Merged::Gate(Z),
        (Z, Z) => Merged::Removed,
        (Rx(a), Rx(b)) => rotation(Rx, a + b),
        (Ry(a), Ry(b)) => rotation(Ry, a + b),
        (Rz(a), Rz(b)) => rotation(Rz, a + b),
        (P(a), P(b)) => rotation(P, a + b),
        _ => return None,
    };
    Some(merged)
}

/// A rotation by `theta`, dropped when it is a multiple of 2π.
fn rotation(make: fn(f64) -> StandardGate, theta: f64) -> Merged {
    if normalize_angle(theta).abs() < EPSILON {
        Merged::Removed
    } else {
        Merged::Gate(make(theta))
    }
}

fn single_qubit_gate(inst: &Instruction) -> Option<&StandardGate> {
    inst.as_gate().filter(|g| g.num_qubits() == 1)
}

/// Merge adjacent same-qubit gates: T·T→S, S·S→Z, Z·Z→removed, T†·T†→S†,
/// S†·S†→Z, and same-axis rotations.
///
/// Merges cascade: `T T T T` becomes `Z`.
pub fn merge_adjacent_gates(gates: Vec<Instruction>) -> Vec<Instruction> {
    let mut stack: Vec<Instruction> = Vec::with_capacity(gates.len());
    for inst in gates {
        let mut current = inst;
        loop {
            let merged = match (stack.last(), single_qubit_gate(&current)) {
                (Some(top), Some(gate)) if top.qubits == current.qubits => {
                    single_qubit_gate(top).and_then(|prev| merge_pair(prev, gate))
                }
                _ => None,
            };
            match merged {
                Some(Merged::Removed) => {
                    stack.pop();
                    break;
                }
                Some(Merged::Gate(gate)) => {
                    stack.pop();
                    current = Instruction::gate(gate, current.qubits);
                }
                None => {
                    stack.push(current);
                    break;
                }
            }
        }
    }
    stack
}

/// Adjacent-merge pass.
pub struct MergeAdjacentGates;

impl OptimizationPass for MergeAdjacentGates {
    fn name(&self) -> &'static str {
        "MergeAdjacentGates"
    }

    fn run(&self, gates: Vec<Instruction>) -> Vec<Instruction> {
        merge_adjacent_gates(gates)
    }
}
