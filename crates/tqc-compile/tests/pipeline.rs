//! End-to-end tests of gate/braid compilation in both directions.

use std::f64::consts::PI;

use num_complex::Complex64;
use tqc_compile::{
    ApproximationSearch, BraidToGateOptions, CompileError, ErrorCategory, Unitary2x2,
    compile_gate_sequence, compile_to_gates, optimize_with_stats,
};
use tqc_ir::{
    AnyonType, BraidGenerator, BraidWord, GateSequence, Instruction, QubitId, StandardGate,
};

fn sequence(num_qubits: u32, gates: Vec<Instruction>) -> GateSequence {
    GateSequence::new(num_qubits, gates).unwrap()
}

fn g1(gate: StandardGate, q: u32) -> Instruction {
    Instruction::single_qubit_gate(gate, QubitId(q))
}

fn round_trip(gate: StandardGate, q: u32) -> Vec<Instruction> {
    let seq = sequence(q + 1, vec![g1(gate, q)]);
    let result = compile_gate_sequence(&seq, 1e-10, AnyonType::Ising).unwrap();
    assert!(result.is_exact);
    assert_eq!(result.compiled_braids.len(), 1);
    compile_to_gates(
        &result.compiled_braids[0],
        AnyonType::Ising,
        &BraidToGateOptions::new(),
    )
    .unwrap()
    .into_gates()
}

#[test]
fn test_measure_and_barrier_compile_to_empty_braids() {
    let seq = sequence(
        2,
        vec![Instruction::measure(QubitId(1)), Instruction::barrier_all()],
    );
    for anyon in AnyonType::ALL {
        for tolerance in [0.0, 1e-10, 0.5] {
            let result = compile_gate_sequence(&seq, tolerance, anyon).unwrap();
            assert_eq!(result.compiled_braids.len(), 2);
            assert!(result.compiled_braids.iter().all(BraidWord::is_empty));
            assert_eq!(result.total_error, 0.0);
            assert!(result.is_exact);
        }
    }
}

#[test]
fn test_phase_gates_round_trip() {
    assert_eq!(round_trip(StandardGate::S, 0), vec![g1(StandardGate::S, 0)]);
    assert_eq!(round_trip(StandardGate::S, 2), vec![g1(StandardGate::S, 2)]);
    assert_eq!(
        round_trip(StandardGate::Z, 1),
        vec![g1(StandardGate::S, 1), g1(StandardGate::S, 1)]
    );
}

#[test]
fn test_ising_rz_lattice() {
    for theta in [PI / 2.0, PI, 3.0 * PI / 2.0] {
        let seq = sequence(1, vec![g1(StandardGate::Rz(theta), 0)]);
        let result = compile_gate_sequence(&seq, 1e-10, AnyonType::Ising).unwrap();
        assert!(result.total_error < 1e-10, "Rz({theta}): {}", result.total_error);
    }

    let off_lattice = sequence(1, vec![g1(StandardGate::Rz(0.5), 0)]);
    let err = compile_gate_sequence(&off_lattice, 1e-10, AnyonType::Ising).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Computation);

    let loose = compile_gate_sequence(&off_lattice, 0.6, AnyonType::Ising).unwrap();
    assert!(loose.total_error > 0.0);
    assert!(!loose.is_exact);
    assert_eq!(loose.warnings.len(), 1);
}

#[test]
fn test_search_monotonic_in_max_length() {
    let target = Unitary2x2::from_gate(&StandardGate::Rz(0.7)).unwrap();
    for anyon in AnyonType::ALL {
        let search = ApproximationSearch::new(anyon);
        let mut previous = f64::INFINITY;
        for max_length in 1..=8 {
            // A negative tolerance disables the early stop.
            let found = search.approximate(&target, -1.0, 1, max_length).unwrap();
            assert!(found.error <= previous + 1e-10, "{anyon}, L={max_length}");
            previous = found.error;
        }
    }
}

#[test]
fn test_optimizer_t_pair() {
    let (out, stats) = optimize_with_stats(
        vec![g1(StandardGate::T, 0), g1(StandardGate::Tdg, 0)],
        1,
    );
    assert!(out.is_empty());
    assert_eq!(stats.original_t_count, 2);
    assert_eq!(stats.optimized_t_count, 0);
}

#[test]
fn test_toffoli_compiles() {
    let ccx = Instruction::gate(StandardGate::CCX, [QubitId(0), QubitId(1), QubitId(2)]);
    let seq = sequence(3, vec![ccx]);
    for (anyon, tolerance) in [(AnyonType::Ising, 0.1), (AnyonType::Fibonacci, 0.5)] {
        let result = compile_gate_sequence(&seq, tolerance, anyon).unwrap();
        assert_eq!(result.original_gate_count, 1);
        assert!(result.compiled_braids.len() > 1, "{anyon}");
        assert!(!result.is_exact);
    }
}

#[test]
fn test_multi_controlled_z_compiles() {
    let qubits: Vec<QubitId> = (0..4).map(QubitId).collect();
    let seq = sequence(4, vec![Instruction::gate(StandardGate::MCZ { controls: 3 }, qubits)]);
    for (anyon, tolerance) in [(AnyonType::Ising, 1.0), (AnyonType::Fibonacci, 0.5)] {
        let result = compile_gate_sequence(&seq, tolerance, anyon).unwrap();
        assert_eq!(result.original_gate_count, 1);
        assert!(result.compiled_braids.len() > 1, "{anyon}");
    }
}

#[test]
fn test_controlled_phase_per_model() {
    let cp = Instruction::two_qubit_gate(StandardGate::CP(PI), QubitId(0), QubitId(1));
    let seq = sequence(2, vec![cp]);

    let ising = compile_gate_sequence(&seq, 1e-10, AnyonType::Ising).unwrap();
    assert!(ising.is_exact);

    let err = compile_gate_sequence(&seq, 0.5, AnyonType::Fibonacci).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Logic);
    assert!(matches!(err, CompileError::UnsupportedGate { transpiled: true, .. }));
    assert!(err.to_string().contains("transpiled"));
}

#[test]
fn test_total_phase_unit_modulus() {
    let empty = BraidWord::empty(3).unwrap();
    let word = BraidWord::new(
        3,
        vec![
            BraidGenerator::clockwise(0),
            BraidGenerator::counter_clockwise(1),
            BraidGenerator::clockwise(1),
            BraidGenerator::clockwise(0),
        ],
    )
    .unwrap();
    for anyon in AnyonType::ALL {
        let options = BraidToGateOptions::new();
        let seq = compile_to_gates(&empty, anyon, &options).unwrap();
        assert_eq!(seq.total_phase(), Complex64::new(1.0, 0.0));

        let seq = compile_to_gates(&word, anyon, &options).unwrap();
        assert!((seq.total_phase().norm() - 1.0).abs() < 1e-12);
        assert_eq!(seq.num_qubits(), 2);
    }
}

#[test]
fn test_fibonacci_scenario() {
    let seq = sequence(
        1,
        vec![
            g1(StandardGate::H, 0),
            g1(StandardGate::T, 0),
            Instruction::measure(QubitId(0)),
        ],
    );
    let result = compile_gate_sequence(&seq, 0.5, AnyonType::Fibonacci).unwrap();
    assert_eq!(result.original_gate_count, 3);
    assert!(!result.compiled_braids.is_empty());
    assert!(result.warnings.len() >= 2);
    assert!(!result.is_exact);
    assert!(result.to_string().starts_with("CompilationResult (Fibonacci)"));
}

#[test]
fn test_empty_sequence() {
    for anyon in AnyonType::ALL {
        let result = compile_gate_sequence(&GateSequence::empty(2), 1e-10, anyon).unwrap();
        assert_eq!(result.original_gate_count, 0);
        assert!(result.compiled_braids.is_empty());
        assert!(result.is_exact);
    }
}

#[test]
fn test_depth_follows_qubit_dependencies() {
    let seq = sequence(
        3,
        vec![
            g1(StandardGate::H, 0),
            g1(StandardGate::H, 1),
            g1(StandardGate::H, 2),
            Instruction::two_qubit_gate(StandardGate::CX, QubitId(0), QubitId(1)),
            g1(StandardGate::T, 2),
        ],
    );
    assert_eq!(seq.depth(), 2);

    let word = BraidWord::new(
        3,
        vec![
            BraidGenerator::clockwise(0),
            BraidGenerator::clockwise(1),
            BraidGenerator::clockwise(0),
        ],
    )
    .unwrap();
    let gates = compile_to_gates(&word, AnyonType::Ising, &BraidToGateOptions::new()).unwrap();
    assert_eq!(gates.depth(), 2);
}
