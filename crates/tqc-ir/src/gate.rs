//! Quantum gate types.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

/// Tolerance for angle comparisons.
const EPSILON: f64 = 1e-10;

/// The closed set of gates the compiler understands.
///
/// Lowering rules, mappers and optimizer passes match on it exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    /// Identity gate.
    I,
    /// Hadamard gate.
    H,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,
    /// S gate (sqrt(Z)).
    S,
    /// S-dagger gate.
    Sdg,
    /// T gate (fourth root of Z).
    T,
    /// T-dagger gate.
    Tdg,
    /// Rotation around X axis.
    Rx(f64),
    /// Rotation around Y axis.
    Ry(f64),
    /// Rotation around Z axis.
    Rz(f64),
    /// Phase gate diag(1, e^{iθ}).
    P(f64),

    /// Controlled-X (CNOT) gate, qubits `[control, target]`.
    CX,
    /// Controlled-Z gate.
    CZ,
    /// SWAP gate.
    Swap,
    /// Controlled phase gate, qubits `[control, target]`.
    CP(f64),

    /// Toffoli gate, qubits `[control, control, target]`.
    CCX,
    /// Multi-controlled Z, qubits `[controls.., target]`.
    MCZ {
        /// Number of control qubits.
        controls: u32,
    },
}

impl StandardGate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::I => "id",
            StandardGate::H => "h",
            StandardGate::X => "x",
            StandardGate::Y => "y",
            StandardGate::Z => "z",
            StandardGate::S => "s",
            StandardGate::Sdg => "sdg",
            StandardGate::T => "t",
            StandardGate::Tdg => "tdg",
            StandardGate::Rx(_) => "rx",
            StandardGate::Ry(_) => "ry",
            StandardGate::Rz(_) => "rz",
            StandardGate::P(_) => "p",
            StandardGate::CX => "cx",
            StandardGate::CZ => "cz",
            StandardGate::Swap => "swap",
            StandardGate::CP(_) => "cp",
            StandardGate::CCX => "ccx",
            StandardGate::MCZ { .. } => "mcz",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::I
            | StandardGate::H
            | StandardGate::X
            | StandardGate::Y
            | StandardGate::Z
            | StandardGate::S
            | StandardGate::Sdg
            | StandardGate::T
            | StandardGate::Tdg
            | StandardGate::Rx(_)
            | StandardGate::Ry(_)
            | StandardGate::Rz(_)
            | StandardGate::P(_) => 1,

            StandardGate::CX | StandardGate::CZ | StandardGate::Swap | StandardGate::CP(_) => 2,

            StandardGate::CCX => 3,

            StandardGate::MCZ { controls } => controls + 1,
        }
    }

    /// The rotation angle of a parameterized gate.
    pub fn angle(&self) -> Option<f64> {
        match self {
            StandardGate::Rx(theta)
            | StandardGate::Ry(theta)
            | StandardGate::Rz(theta)
            | StandardGate::P(theta)
            | StandardGate::CP(theta) => Some(*theta),
            _ => None,
        }
    }

    /// The relative phase `arg(U[1][1] / U[0][0])` of a diagonal
    /// single-qubit gate, or `None` if the gate is not diagonal.
    pub fn diagonal_phase(&self) -> Option<f64> {
        match self {
            StandardGate::I => Some(0.0),
            StandardGate::Z => Some(PI),
            StandardGate::S => Some(PI / 2.0),
            StandardGate::Sdg => Some(-PI / 2.0),
            StandardGate::T => Some(PI / 4.0),
            StandardGate::Tdg => Some(-PI / 4.0),
            StandardGate::Rz(theta) | StandardGate::P(theta) => Some(*theta),
            _ => None,
        }
    }

    /// Check if this gate is diagonal in the computational basis.
    pub fn is_diagonal(&self) -> bool {
        matches!(self, StandardGate::CZ | StandardGate::CP(_) | StandardGate::MCZ { .. })
            || self.diagonal_phase().is_some()
    }

    /// Check if this gate is a member of the Clifford group.
    ///
    /// Rotations are classified as non-Clifford regardless of their angle.
    pub fn is_clifford(&self) -> bool {
        matches!(
            self,
            StandardGate::I
                | StandardGate::H
                | StandardGate::X
                | StandardGate::Y
                | StandardGate::Z
                | StandardGate::S
                | StandardGate::Sdg
                | StandardGate::CX
                | StandardGate::CZ
                | StandardGate::Swap
        )
    }

    /// Check if this gate counts towards the T-count.
    #[inline]
    pub fn is_t_gate(&self) -> bool {
        matches!(self, StandardGate::T | StandardGate::Tdg)
    }

    /// Check if this gate is its own inverse.
    pub fn is_self_inverse(&self) -> bool {
        matches!(
            self,
            StandardGate::I
                | StandardGate::H
                | StandardGate::X
                | StandardGate::Y
                | StandardGate::Z
                | StandardGate::CX
                | StandardGate::CZ
                | StandardGate::Swap
                | StandardGate::CCX
                | StandardGate::MCZ { .. }
        )
    }

    /// The inverse gate acting on the same qubits.
    pub fn inverse(&self) -> StandardGate {
        match *self {
            StandardGate::S => StandardGate::Sdg,
            StandardGate::Sdg => StandardGate::S,
            StandardGate::T => StandardGate::Tdg,
            StandardGate::Tdg => StandardGate::T,
            StandardGate::Rx(theta) => StandardGate::Rx(-theta),
            StandardGate::Ry(theta) => StandardGate::Ry(-theta),
            StandardGate::Rz(theta) => StandardGate::Rz(-theta),
            StandardGate::P(theta) => StandardGate::P(-theta),
            StandardGate::CP(theta) => StandardGate::CP(-theta),
            other => other,
        }
    }

    /// Check if `other` equals this gate, comparing angles with tolerance.
    pub fn approx_eq(&self, other: &StandardGate) -> bool {
        match (self, other) {
            (StandardGate::Rx(a), StandardGate::Rx(b))
            | (StandardGate::Ry(a), StandardGate::Ry(b))
            | (StandardGate::Rz(a), StandardGate::Rz(b))
            | (StandardGate::P(a), StandardGate::P(b))
            | (StandardGate::CP(a), StandardGate::CP(b)) => (a - b).abs() < EPSILON,
            _ => self == other,
        }
    }
}

impl fmt::Display for StandardGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StandardGate::MCZ { controls } => write!(f, "mcz[{controls}]"),
            other => match other.angle() {
                Some(theta) => write!(f, "{}({theta:.6})", other.name()),
                None => f.write_str(other.name()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_gate_properties() {
        assert_eq!(StandardGate::H.num_qubits(), 1);
        assert_eq!(StandardGate::CX.num_qubits(), 2);
        assert_eq!(StandardGate::CCX.num_qubits(), 3);
        assert_eq!(StandardGate::MCZ { controls: 3 }.num_qubits(), 4);

        assert_eq!(StandardGate::Rz(0.5).angle(), Some(0.5));
        assert!(StandardGate::H.angle().is_none());
    }

    #[test]
    fn test_inverse_pairs() {
        assert_eq!(StandardGate::T.inverse(), StandardGate::Tdg);
        assert_eq!(StandardGate::Sdg.inverse(), StandardGate::S);
        assert_eq!(StandardGate::H.inverse(), StandardGate::H);
        assert!(StandardGate::Rz(0.3).inverse().approx_eq(&StandardGate::Rz(-0.3)));
    }

    #[test]
    fn test_diagonal_phase() {
        assert_eq!(StandardGate::S.diagonal_phase(), Some(PI / 2.0));
        assert_eq!(StandardGate::Z.diagonal_phase(), Some(PI));
        assert!(StandardGate::H.diagonal_phase().is_none());
        assert!(StandardGate::CZ.is_diagonal());
        assert!(!StandardGate::CX.is_diagonal());
    }

    #[test]
    fn test_clifford_classification() {
        assert!(StandardGate::S.is_clifford());
        assert!(StandardGate::CX.is_clifford());
        assert!(!StandardGate::T.is_clifford());
        assert!(!StandardGate::Rz(PI / 2.0).is_clifford());
        assert!(StandardGate::Tdg.is_t_gate());
    }

    #[test]
    fn test_display() {
        assert_eq!(StandardGate::Sdg.to_string(), "sdg");
        assert_eq!(StandardGate::MCZ { controls: 2 }.to_string(), "mcz[2]");
        assert_eq!(StandardGate::Rz(0.5).to_string(), "rz(0.500000)");
    }
}
