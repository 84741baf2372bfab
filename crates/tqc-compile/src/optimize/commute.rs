//! Commutation analysis and commutation-based rewrites.

use tqc_ir::{Instruction, StandardGate};

use crate::pass::OptimizationPass;

use super::cancel::are_inverse;

fn is_identity(gate: &StandardGate) -> bool {
    matches!(gate, StandardGate::I)
}

/// `single` acts on the control of `cx` as a diagonal gate, or on its target
/// as an X-axis gate. Malformed operand lists never commute.
fn commutes_with_cx(cx: &Instruction, single: &Instruction, gate: &StandardGate) -> bool {
    if gate.num_qubits() != 1 {
        return false;
    }
    let (&[q], &[control, target]) = (single.qubits.as_slice(), cx.qubits.as_slice()) else {
        return false;
    };
    (q == control && gate.is_diagonal())
        || (q == target && matches!(gate, StandardGate::X | StandardGate::Rx(_)))
}

/// Check if two instructions commute.
///
/// The check is conservative: `false` only forgoes an optimization.
/// Measurements, resets and barriers never commute with anything they share
/// a qubit with.
pub fn commutes(a: &Instruction, b: &Instruction) -> bool {
    if a.as_gate().is_some_and(is_identity) || b.as_gate().is_some_and(is_identity) {
        return true;
    }
    if !a.overlaps(b) {
        return true;
    }
    let (Some(ga), Some(gb)) = (a.as_gate(), b.as_gate()) else {
        return false;
    };
    // Diagonal gates commute with each other whatever their qubits.
    if ga.is_diagonal() && gb.is_diagonal() {
        return true;
    }
    if ga.approx_eq(gb) && a.qubits == b.qubits {
        return true;
    }
    match (ga, gb) {
        (StandardGate::CX, _) => commutes_with_cx(a, b, gb),
        (_, StandardGate::CX) => commutes_with_cx(b, a, ga),
        _ => false,
    }
}

fn is_clifford(inst: &Instruction) -> bool {
    inst.as_gate().is_some_and(StandardGate::is_clifford)
}

fn is_non_clifford(inst: &Instruction) -> bool {
    inst.as_gate().is_some_and(|g| !g.is_clifford())
}

/// One sweep moving Clifford gates left past commuting non-Clifford gates.
///
/// Returns the rewritten list and whether anything moved.
fn commute_cliffords_left_once(mut gates: Vec<Instruction>) -> (Vec<Instruction>, bool) {
    let mut moved = false;
    let mut i = 0;
    while i + 1 < gates.len() {
        if is_non_clifford(&gates[i]) && is_clifford(&gates[i + 1]) && commutes(&gates[i], &gates[i + 1])
        {
            gates.swap(i, i + 1);
            moved = true;
            i += 2;
        } else {
            i += 1;
        }
    }
    (gates, moved)
}

/// Swap each adjacent (non-Clifford, Clifford) pair that commutes.
pub fn commute_cliffords_left(gates: Vec<Instruction>) -> Vec<Instruction> {
    commute_cliffords_left_once(gates).0
}

/// Repeat [`commute_cliffords_left`] until nothing moves.
///
/// Every swap removes one (non-Clifford, Clifford) inversion, so the loop is
/// bounded by the square of the list length.
pub fn commute_cliffords_left_until_stable(gates: Vec<Instruction>) -> Vec<Instruction> {
    let cap = gates.len() * gates.len() + 1;
    let mut current = gates;
    for _ in 0..cap {
        let (next, moved) = commute_cliffords_left_once(current);
        current = next;
        if !moved {
            break;
        }
    }
    current
}

/// Cancel gate/inverse pairs separated only by gates that commute with both.
pub fn commutation_cancellation(gates: Vec<Instruction>) -> Vec<Instruction> {
    let n = gates.len();
    let mut removed = vec![false; n];

    for i in 0..n {
        if removed[i] || gates[i].as_gate().is_none() {
            continue;
        }
        for j in (i + 1)..n {
            if removed[j] {
                continue;
            }
            if are_inverse(&gates[i], &gates[j])
                && (i + 1..j)
                    .filter(|k| !removed[*k])
                    .all(|k| commutes(&gates[k], &gates[i]) && commutes(&gates[k], &gates[j]))
            {
                removed[i] = true;
                removed[j] = true;
                break;
            }
            if !commutes(&gates[i], &gates[j]) {
                break;
            }
        }
    }

    gates
        .into_iter()
        .zip(removed)
        .filter_map(|(g, r)| if r { None } else { Some(g) })
        .collect()
}

/// Clifford-left commutation pass, run until stable.
pub struct CommuteCliffordsLeft;

impl OptimizationPass for CommuteCliffordsLeft {
    fn name(&self) -> &'static str {
        "CommuteCliffordsLeft"
    }

    fn run(&self, gates: Vec<Instruction>) -> Vec<Instruction> {
        commute_cliffords_left_until_stable(gates)
    }
}

/// Commutation-aware cancellation pass.
pub struct CommutationCancellation;

impl OptimizationPass for CommutationCancellation {
    fn name(&self) -> &'static str {
        "CommutationCancellation"
    }

    fn run(&self, gates: Vec<Instruction>) -> Vec<Instruction> {
        commutation_cancellation(gates)
    }

    fn should_run(&self, gates: &[Instruction]) -> bool {
        gates.len() >= 2
    }
}
