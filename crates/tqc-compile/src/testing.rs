//! State-vector helpers for checking rewrites in unit tests.

use num_complex::Complex64;
use tqc_ir::{Instruction, StandardGate};

use crate::unitary::Unitary2x2;

/// Columns of the unitary of `gates` on `n` qubits.
///
/// Supports single-qubit gates and CX; measurements and barriers are skipped.
pub(crate) fn simulate(gates: &[Instruction], n: u32) -> Vec<Vec<Complex64>> {
    let dim = 1_usize << n;
    (0..dim)
        .map(|basis| {
            let mut state = vec![Complex64::new(0.0, 0.0); dim];
            state[basis] = Complex64::new(1.0, 0.0);
            for inst in gates {
                apply(inst, &mut state);
            }
            state
        })
        .collect()
}

fn apply(inst: &Instruction, state: &mut [Complex64]) {
    let Some(gate) = inst.as_gate() else {
        return;
    };
    if *gate == StandardGate::CX {
        let (c, t) = (inst.qubits[0].0, inst.qubits[1].0);
        for i in 0..state.len() {
            if (i >> c) & 1 == 1 && (i >> t) & 1 == 0 {
                state.swap(i, i | (1 << t));
            }
        }
        return;
    }
    let u = Unitary2x2::from_gate(gate).expect("single-qubit gate or CX");
    let t = inst.qubits[0].0;
    for i in 0..state.len() {
        if (i >> t) & 1 == 0 {
            let j = i | (1 << t);
            let (a, b) = (state[i], state[j]);
            state[i] = u.data[0] * a + u.data[1] * b;
            state[j] = u.data[2] * a + u.data[3] * b;
        }
    }
}

/// Check that two unitaries (as column lists) agree up to global phase.
pub(crate) fn equal_up_to_phase(a: &[Vec<Complex64>], b: &[Vec<Complex64>]) -> bool {
    let mut phase: Option<Complex64> = None;
    for (ca, cb) in a.iter().zip(b) {
        for (x, y) in ca.iter().zip(cb) {
            if x.norm() < 1e-9 && y.norm() < 1e-9 {
                continue;
            }
            if y.norm() < 1e-9 {
                return false;
            }
            let ratio = x / y;
            match phase {
                None => phase = Some(ratio),
                Some(p) if (p - ratio).norm() > 1e-9 => return false,
                Some(_) => {}
            }
        }
    }
    true
}

/// Columns of the diagonal unitary with entries `phases`.
pub(crate) fn diagonal(phases: &[Complex64]) -> Vec<Vec<Complex64>> {
    (0..phases.len())
        .map(|basis| {
            let mut column = vec![Complex64::new(0.0, 0.0); phases.len()];
            column[basis] = phases[basis];
            column
        })
        .collect()
}
