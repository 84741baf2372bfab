//! Fixed local rewrites on single-qubit gate runs.

use tqc_ir::{Instruction, QubitId, StandardGate};

use crate::pass::OptimizationPass;

/// A pattern of consecutive gates on one wire and its shorter replacement.
struct Template {
    pattern: &'static [StandardGate],
    replacement: &'static [StandardGate],
}

/// Longest pattern first.
const TEMPLATES: &[Template] = &[
    Template {
        pattern: &[
            StandardGate::T,
            StandardGate::T,
            StandardGate::T,
            StandardGate::T,
            StandardGate::T,
            StandardGate::T,
            StandardGate::T,
        ],
        replacement: &[StandardGate::Tdg],
    },
    Template {
        pattern: &[StandardGate::T, StandardGate::T, StandardGate::T],
        replacement: &[StandardGate::S, StandardGate::T],
    },
    Template {
        pattern: &[StandardGate::S, StandardGate::S, StandardGate::S],
        replacement: &[StandardGate::Sdg],
    },
    Template {
        pattern: &[StandardGate::H, StandardGate::Z, StandardGate::H],
        replacement: &[StandardGate::X],
    },
    Template {
        pattern: &[StandardGate::H, StandardGate::X, StandardGate::H],
        replacement: &[StandardGate::Z],
    },
];

const LONGEST_PATTERN: usize = 7;

fn single_qubit_target(inst: &Instruction) -> Option<QubitId> {
    match inst.as_gate() {
        Some(g) if g.num_qubits() == 1 => inst.qubits.first().copied(),
        _ => None,
    }
}

/// Indices of the gates that follow `start` on its wire, up to the first
/// instruction on that wire that is not a single-qubit gate.
fn wire_run(gates: &[Instruction], start: usize, consumed: &[bool], qubit: QubitId) -> Vec<usize> {
    let mut run = vec![start];
    for (j, inst) in gates.iter().enumerate().skip(start + 1) {
        if run.len() == LONGEST_PATTERN {
            break;
        }
        if consumed[j] {
            continue;
        }
        let touches = inst.qubits.contains(&qubit) || (inst.is_barrier() && inst.qubits.is_empty());
        if !touches {
            continue;
        }
        if single_qubit_target(inst) == Some(qubit) {
            run.push(j);
        } else {
            break;
        }
    }
    run
}

/// Apply the first template that matches at the head of each wire run.
///
/// Gates on other qubits may sit between the matched gates; the replacement
/// takes the place of the first matched gate.
pub fn template_match(gates: Vec<Instruction>) -> Vec<Instruction> {
    let mut consumed = vec![false; gates.len()];
    let mut out = Vec::with_capacity(gates.len());

    for i in 0..gates.len() {
        if consumed[i] {
            continue;
        }
        let Some(qubit) = single_qubit_target(&gates[i]) else {
            out.push(gates[i].clone());
            continue;
        };

        let run = wire_run(&gates, i, &consumed, qubit);
        let matched = TEMPLATES.iter().find(|t| {
            run.len() >= t.pattern.len()
                && t
                    .pattern
                    .iter()
                    .zip(&run)
                    .all(|(p, &k)| gates[k].as_gate().is_some_and(|g| g.approx_eq(p)))
        });

        match matched {
            Some(template) => {
                for &k in &run[1..template.pattern.len()] {
                    consumed[k] = true;
                }
                out.extend(
                    template
                        .replacement
                        .iter()
                        .map(|g| Instruction::single_qubit_gate(*g, qubit)),
                );
            }
            None => out.push(gates[i].clone()),
        }
    }

    out
}

/// Repeat [`template_match`] until the list stops shrinking.
pub fn template_match_until_stable(gates: Vec<Instruction>) -> Vec<Instruction> {
    let mut current = gates;
    loop {
        let before = current.len();
        current = template_match(current);
        // Every rewrite shortens the list.
        if current.len() == before {
            return current;
        }
    }
}

/// Template rewriting pass, run until stable.
pub struct TemplateMatch;

impl OptimizationPass for TemplateMatch {
    fn name(&self) -> &'static str {
        "TemplateMatch"
    }

    fn run(&self, gates: Vec<Instruction>) -> Vec<Instruction> {
        template_match_until_stable(gates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn g1(gate: StandardGate, q: u32) -> Instruction {
        Instruction::single_qubit_gate(gate, QubitId(q))
    }

    fn gates_of(list: &[Instruction]) -> Vec<StandardGate> {
        list.iter().filter_map(|i| i.as_gate().copied()).collect()
    }

    #[test]
    fn test_seven_t_is_tdg() {
        let out = template_match(vec![g1(StandardGate::T, 0); 7]);
        assert_eq!(out, vec![g1(StandardGate::Tdg, 0)]);
    }

    #[test]
    fn test_three_t_is_s_t() {
        let out = template_match(vec![g1(StandardGate::T, 0); 3]);
        assert_eq!(gates_of(&out), vec![StandardGate::S, StandardGate::T]);
    }

    #[test]
    fn test_hadamard_conjugation() {
        let hzh = vec![g1(StandardGate::H, 0), g1(StandardGate::Z, 0), g1(StandardGate::H, 0)];
        assert_eq!(template_match(hzh), vec![g1(StandardGate::X, 0)]);
        let hxh = vec![g1(StandardGate::H, 0), g1(StandardGate::X, 0), g1(StandardGate::H, 0)];
        assert_eq!(template_match(hxh), vec![g1(StandardGate::Z, 0)]);
    }

    #[test]
    fn test_run_spans_other_wires() {
        let gates = vec![
            g1(StandardGate::S, 0),
            g1(StandardGate::H, 1),
            g1(StandardGate::S, 0),
            g1(StandardGate::S, 0),
        ];
        assert_eq!(
            template_match(gates),
            vec![g1(StandardGate::Sdg, 0), g1(StandardGate::H, 1)]
        );
    }

    #[test]
    fn test_run_stops_at_two_qubit_gate() {
        let gates = vec![
            g1(StandardGate::S, 0),
            Instruction::two_qubit_gate(StandardGate::CX, QubitId(0), QubitId(1)),
            g1(StandardGate::S, 0),
            g1(StandardGate::S, 0),
        ];
        assert_eq!(template_match(gates.clone()), gates);
    }

    #[test]
    fn test_until_stable() {
        // 6 T → (S T)(S T) → S T S T; no further template applies.
        let out = template_match_until_stable(vec![g1(StandardGate::T, 0); 6]);
        assert_eq!(out.len(), 4);
        assert_eq!(tqc_ir::t_count(&out), 2);
    }
}
