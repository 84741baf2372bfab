//! Unitary matrix utilities for braid approximation.
//!
//! Provides 2x2 unitary matrix operations used to build braid-word unitaries
//! and to measure how far a candidate word is from a target gate.

use num_complex::Complex64;
use std::f64::consts::PI;
use tqc_ir::StandardGate;

/// Tolerance for floating point comparisons.
const EPSILON: f64 = 1e-10;

/// Entries below this magnitude are ignored when picking a phase reference.
const PHASE_REFERENCE_FLOOR: f64 = 1e-6;

/// Scale applied before rounding matrix entries into a dedup key.
const KEY_SCALE: f64 = 1e8;

/// A 2x2 unitary matrix in row-major order.
#[derive(Debug, Clone, Copy)]
pub struct Unitary2x2 {
    /// The matrix elements in row-major order: [[a, b], [c, d]].
    pub data: [Complex64; 4],
}

impl Unitary2x2 {
    /// Create a new 2x2 unitary matrix.
    pub fn new(a: Complex64, b: Complex64, c: Complex64, d: Complex64) -> Self {
        Self { data: [a, b, c, d] }
    }

    /// Create a diagonal matrix diag(a, d).
    pub fn diag(a: Complex64, d: Complex64) -> Self {
        let zero = Complex64::new(0.0, 0.0);
        Self::new(a, zero, zero, d)
    }

    /// Create the identity matrix.
    pub fn identity() -> Self {
        Self::diag(Complex64::new(1.0, 0.0), Complex64::new(1.0, 0.0))
    }

    /// Create a Hadamard matrix.
    pub fn h() -> Self {
        let s = Complex64::new(1.0 / 2.0_f64.sqrt(), 0.0);
        Self::new(s, s, s, -s)
    }

    /// Create a Pauli-X matrix.
    pub fn x() -> Self {
        let zero = Complex64::new(0.0, 0.0);
        let one = Complex64::new(1.0, 0.0);
        Self::new(zero, one, one, zero)
    }

    /// Create a Pauli-Y matrix.
    pub fn y() -> Self {
        let zero = Complex64::new(0.0, 0.0);
        Self::new(zero, Complex64::new(0.0, -1.0), Complex64::new(0.0, 1.0), zero)
    }

    /// Create an RX rotation matrix.
    pub fn rx(theta: f64) -> Self {
        let c = Complex64::new((theta / 2.0).cos(), 0.0);
        let s = Complex64::new(0.0, -(theta / 2.0).sin());
        Self::new(c, s, s, c)
    }

    /// Create an RY rotation matrix.
    pub fn ry(theta: f64) -> Self {
        let c = (theta / 2.0).cos();
        let s = (theta / 2.0).sin();
        Self::new(
            Complex64::new(c, 0.0),
            Complex64::new(-s, 0.0),
            Complex64::new(s, 0.0),
            Complex64::new(c, 0.0),
        )
    }

    /// Create an RZ rotation matrix.
    pub fn rz(theta: f64) -> Self {
        Self::diag(
            Complex64::from_polar(1.0, -theta / 2.0),
            Complex64::from_polar(1.0, theta / 2.0),
        )
    }

    /// Create a phase gate P(lambda).
    pub fn p(lambda: f64) -> Self {
        Self::diag(Complex64::new(1.0, 0.0), Complex64::from_polar(1.0, lambda))
    }

    /// The matrix of a single-qubit gate, or `None` for multi-qubit gates.
    pub fn from_gate(gate: &StandardGate) -> Option<Self> {
        let u = match *gate {
            StandardGate::I => Self::identity(),
            StandardGate::H => Self::h(),
            StandardGate::X => Self::x(),
            StandardGate::Y => Self::y(),
            StandardGate::Z => Self::p(PI),
            StandardGate::S => Self::p(PI / 2.0),
            StandardGate::Sdg => Self::p(-PI / 2.0),
            StandardGate::T => Self::p(PI / 4.0),
            StandardGate::Tdg => Self::p(-PI / 4.0),
            StandardGate::Rx(theta) => Self::rx(theta),
            StandardGate::Ry(theta) => Self::ry(theta),
            StandardGate::Rz(theta) => Self::rz(theta),
            StandardGate::P(theta) => Self::p(theta),
            StandardGate::CX
            | StandardGate::CZ
            | StandardGate::Swap
            | StandardGate::CP(_)
            | StandardGate::CCX
            | StandardGate::MCZ { .. } => return None,
        };
        Some(u)
    }

    /// Multiply this matrix by another: self * other.
    #[allow(clippy::many_single_char_names)]
    pub fn mul(&self, other: &Self) -> Self {
        let [a, b, c, d] = self.data;
        let [e, f, g, h] = other.data;
        Self::new(a * e + b * g, a * f + b * h, c * e + d * g, c * f + d * h)
    }

    /// Get the conjugate transpose (dagger).
    pub fn dagger(&self) -> Self {
        Self::new(
            self.data[0].conj(),
            self.data[2].conj(),
            self.data[1].conj(),
            self.data[3].conj(),
        )
    }

    /// Matrix trace.
    pub fn trace(&self) -> Complex64 {
        self.data[0] + self.data[3]
    }

    /// Phase-insensitive distance `1 − |Tr(self† · other)| / 2`.
    ///
    /// Zero exactly when the two matrices agree up to global phase; values
    /// below numerical noise are reported as 0.
    pub fn distance(&self, other: &Self) -> f64 {
        let overlap = self.dagger().mul(other).trace().norm() / 2.0;
        let d = (1.0 - overlap).max(0.0);
        if d < 1e-12 { 0.0 } else { d }
    }

    /// Check if this is approximately identity (up to global phase).
    pub fn is_identity(&self) -> bool {
        let [a, b, c, d] = self.data;

        if b.norm() > EPSILON || c.norm() > EPSILON {
            return false;
        }

        (a - d).norm() < EPSILON
    }

    /// A hashable fingerprint that is equal for matrices equal up to global
    /// phase, to within `1 / KEY_SCALE`.
    ///
    /// The phase is fixed by rotating the first non-negligible entry onto the
    /// positive real axis.
    #[allow(clippy::cast_possible_truncation)]
    pub fn phase_key(&self) -> [i64; 8] {
        let reference = self
            .data
            .iter()
            .find(|z| z.norm() > PHASE_REFERENCE_FLOOR)
            .map_or(Complex64::new(1.0, 0.0), |z| z.conj() / z.norm());

        let mut key = [0_i64; 8];
        for (i, z) in self.data.iter().enumerate() {
            let w = z * reference;
            key[2 * i] = (w.re * KEY_SCALE).round() as i64;
            key[2 * i + 1] = (w.im * KEY_SCALE).round() as i64;
        }
        key
    }
}

impl Default for Unitary2x2 {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::ops::Mul for Unitary2x2 {
    type Output = Self;

    #[allow(clippy::needless_pass_by_value)]
    fn mul(self, rhs: Self) -> Self::Output {
        Unitary2x2::mul(&self, &rhs)
    }
}
