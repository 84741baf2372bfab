//! Gate sequences and their dependency structure.

use num_complex::Complex64;
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::IrResult;
use crate::instruction::Instruction;

/// A circuit: an ordered list of instructions over a fixed qubit count.
///
/// Sequences are immutable once built. `total_phase` carries the global phase
/// accumulated by whatever produced the sequence (1 for hand-written circuits).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateSequence {
    gates: Vec<Instruction>,
    num_qubits: u32,
    total_phase: Complex64,
}

impl GateSequence {
    /// Create a sequence, validating every instruction against `num_qubits`.
    pub fn new(num_qubits: u32, gates: Vec<Instruction>) -> IrResult<Self> {
        for gate in &gates {
            gate.validate(num_qubits)?;
        }
        Ok(Self {
            gates,
            num_qubits,
            total_phase: Complex64::new(1.0, 0.0),
        })
    }

    /// Create an empty sequence.
    pub fn empty(num_qubits: u32) -> Self {
        Self {
            gates: Vec::new(),
            num_qubits,
            total_phase: Complex64::new(1.0, 0.0),
        }
    }

    /// Replace the global phase.
    #[must_use]
    pub fn with_total_phase(mut self, phase: Complex64) -> Self {
        self.total_phase = phase;
        self
    }

    /// The instructions in program order.
    #[inline]
    pub fn gates(&self) -> &[Instruction] {
        &self.gates
    }

    /// Consume the sequence, returning its instructions.
    pub fn into_gates(self) -> Vec<Instruction> {
        self.gates
    }

    /// Number of qubits.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Global phase (unit modulus).
    #[inline]
    pub fn total_phase(&self) -> Complex64 {
        self.total_phase
    }

    /// Number of instructions.
    #[inline]
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    /// Check if the sequence has no instructions.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// Number of T and T-dagger gates.
    pub fn t_count(&self) -> usize {
        t_count(&self.gates)
    }

    /// Circuit depth over the qubit-dependency DAG.
    pub fn depth(&self) -> usize {
        dependency_depth(&self.gates, self.num_qubits)
    }
}

impl fmt::Display for GateSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "GateSequence: {} qubits, {} gates, depth {}, T-count {}",
            self.num_qubits,
            self.len(),
            self.depth(),
            self.t_count()
        )?;
        for gate in &self.gates {
            writeln!(f, "  {gate}")?;
        }
        Ok(())
    }
}

/// Number of T and T-dagger gates in a gate list.
pub fn t_count(gates: &[Instruction]) -> usize {
    gates.iter().filter(|g| g.is_t_gate()).count()
}

/// Longest path through the dependency DAG of `gates`.
///
/// Two instructions depend on each other only if they touch a common qubit,
/// so gates on disjoint qubits share a layer no matter where they sit in the
/// list. Barriers order their neighbours but do not occupy a layer.
pub fn dependency_depth(gates: &[Instruction], num_qubits: u32) -> usize {
    let mut graph: DiGraph<usize, ()> = DiGraph::with_capacity(gates.len(), gates.len());
    let mut last_on_qubit: FxHashMap<u32, NodeIndex> = FxHashMap::default();

    for inst in gates {
        let weight = usize::from(!inst.is_barrier());
        let node = graph.add_node(weight);

        let span: Vec<u32> = if inst.is_barrier() && inst.qubits.is_empty() {
            let mut all: Vec<u32> = (0..num_qubits).collect();
            all.extend(last_on_qubit.keys().filter(|q| **q >= num_qubits).copied());
            all
        } else {
            inst.qubits.iter().map(|q| q.0).collect()
        };

        for qubit in span {
            if let Some(prev) = last_on_qubit.insert(qubit, node) {
                graph.update_edge(prev, node, ());
            }
        }
    }

    // Node indices follow program order, which is already topological.
    let mut depths: Vec<usize> = vec![0; graph.node_count()];
    let mut max_depth = 0;
    for node in graph.node_indices() {
        let max_pred_depth = graph
            .edges_directed(node, Direction::Incoming)
            .map(|e| depths[e.source().index()])
            .max()
            .unwrap_or(0);
        let node_depth = max_pred_depth + graph[node];
        depths[node.index()] = node_depth;
        max_depth = max_depth.max(node_depth);
    }

    max_depth
}
