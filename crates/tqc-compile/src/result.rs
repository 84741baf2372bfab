//! Results of gate-to-braid compilation.

use serde::{Deserialize, Serialize};
use std::fmt;

use tqc_ir::{AnyonType, BraidGenerator, BraidWord, QubitId};

/// The braid compiled for one gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateDecomposition {
    /// Display name of the source gate, e.g. `cx` or `rz(0.500000)`.
    pub name: String,
    /// Qubits the source gate acted on.
    pub qubits: Vec<QubitId>,
    /// The compiled braid.
    ///
    /// An approximated single-qubit gate on qubit `q` braids strands `q..=q+2`,
    /// so its word is widened to at least `q + 3` strands. Compiling that word
    /// back with [`crate::compile_to_gates`] yields gates on qubits `q` and
    /// `q + 1`, and a sequence that may be wider than the source.
    pub braid: BraidWord,
    /// Distance between the braid and the gate; 0 when exact.
    pub approximation_error: f64,
    /// Diagnostics produced while compiling this gate.
    pub notes: Vec<String>,
}

impl GateDecomposition {
    /// The braid's generators.
    pub fn braid_sequence(&self) -> &[BraidGenerator] {
        self.braid.generators()
    }

    /// Check if the braid realizes the gate with zero error.
    pub fn is_exact(&self) -> bool {
        self.approximation_error == 0.0
    }
}

impl fmt::Display for GateDecomposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        for (i, qubit) in self.qubits.iter().enumerate() {
            let sep = if i == 0 { " " } else { ", " };
            write!(f, "{sep}{qubit}")?;
        }
        write!(f, " -> {}", self.braid)?;
        if self.is_exact() {
            f.write_str(" (exact)")
        } else {
            write!(f, " (error {:.3e})", self.approximation_error)
        }
    }
}

/// A compiled circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompilationResult {
    /// Per-gate results, in program order after transpilation.
    pub decompositions: Vec<GateDecomposition>,
    /// One braid per decomposition.
    pub compiled_braids: Vec<BraidWord>,
    /// Instruction count of the source sequence before transpilation.
    pub original_gate_count: usize,
    /// Sum of the per-gate errors.
    pub total_error: f64,
    /// True exactly when `total_error` is 0.
    pub is_exact: bool,
    /// The model compiled for.
    pub anyon_type: AnyonType,
    /// Every per-gate note, in order.
    pub warnings: Vec<String>,
}

impl CompilationResult {
    /// Aggregate per-gate decompositions.
    pub fn new(
        anyon_type: AnyonType,
        original_gate_count: usize,
        decompositions: Vec<GateDecomposition>,
    ) -> Self {
        let compiled_braids = decompositions.iter().map(|d| d.braid.clone()).collect();
        let total_error: f64 = decompositions.iter().map(|d| d.approximation_error).sum();
        let warnings = decompositions
            .iter()
            .flat_map(|d| d.notes.iter().cloned())
            .collect();
        Self {
            decompositions,
            compiled_braids,
            original_gate_count,
            total_error,
            is_exact: total_error == 0.0,
            anyon_type,
            warnings,
        }
    }

    /// Total number of generators across every braid.
    pub fn braid_length(&self) -> usize {
        self.compiled_braids.iter().map(BraidWord::len).sum()
    }
}

impl fmt::Display for CompilationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "CompilationResult ({}): {} gates -> {} braids, {} generators",
            self.anyon_type,
            self.original_gate_count,
            self.compiled_braids.len(),
            self.braid_length()
        )?;
        if self.is_exact {
            writeln!(f, "  exact")?;
        } else {
            writeln!(f, "  total error {:.3e}", self.total_error)?;
        }
        for decomposition in &self.decompositions {
            writeln!(f, "  {decomposition}")?;
        }
        for warning in &self.warnings {
            writeln!(f, "  warning: {warning}")?;
        }
        Ok(())
    }
}
