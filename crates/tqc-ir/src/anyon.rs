//! Anyon models and the fusion/braiding oracle the compiler consumes.
//!
//! The compiler only needs a narrow slice of each model's algebra: the fusion
//! channels of two encoding anyons, the R-matrix phase of each channel, and
//! the F-move relating the two pair bases of three encoding anyons. That slice
//! is exposed through [`AnyonModel`]; [`AnyonType`] implements it for the
//! Ising and Fibonacci models.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

/// Topological charge labels across the supported models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Charge {
    /// Trivial charge (vacuum), present in every model.
    Vacuum,
    /// Ising σ.
    Sigma,
    /// Ising ψ (fermion).
    Psi,
    /// Fibonacci τ.
    Tau,
}

impl fmt::Display for Charge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Charge::Vacuum => "1",
            Charge::Sigma => "σ",
            Charge::Psi => "ψ",
            Charge::Tau => "τ",
        })
    }
}

/// The anyon model a circuit is compiled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnyonType {
    /// Ising anyons: one exchange is a π/2 relative phase (S gate).
    Ising,
    /// Fibonacci anyons: braiding is dense in SU(2), never exact.
    Fibonacci,
}

impl AnyonType {
    /// Every declared model.
    pub const ALL: [AnyonType; 2] = [AnyonType::Ising, AnyonType::Fibonacci];

    /// Model name.
    pub fn name(self) -> &'static str {
        match self {
            AnyonType::Ising => "Ising",
            AnyonType::Fibonacci => "Fibonacci",
        }
    }

    /// Check if single-strand-pair braids realize gates exactly.
    ///
    /// True when the braid representation is diagonal on the encoding pair
    /// and its phases form a finite group, so every gate whose phase is a
    /// multiple of the fundamental phase has a zero-error braid.
    pub fn has_exact_phase_braids(self) -> bool {
        match self {
            AnyonType::Ising => true,
            AnyonType::Fibonacci => false,
        }
    }
}

impl fmt::Display for AnyonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fusion and braiding data of an anyon model, restricted to what the
/// gate/braid compiler reads.
pub trait AnyonModel {
    /// The charge of every strand in the encoding.
    fn encoding_charge(&self) -> Charge;

    /// Fusion outcomes of `a × b`. Empty if either charge is foreign to the model.
    fn fuse(&self, a: Charge, b: Charge) -> Vec<Charge>;

    /// R-matrix eigenvalue for exchanging two encoding anyons in `channel`.
    fn r_matrix(&self, channel: Charge) -> Option<Complex64>;

    /// F-move on three encoding anyons, row-major, in the basis of the
    /// first pair's fusion channels ordered as [`AnyonModel::fusion_channels`].
    fn f_matrix(&self) -> [Complex64; 4];

    /// The two fusion channels of an encoding pair; these span one qubit.
    ///
    /// `None` when the encoding pair fuses to fewer than two channels, so the
    /// model cannot carry a qubit.
    fn fusion_channels(&self) -> Option<[Charge; 2]> {
        let a = self.encoding_charge();
        match self.fuse(a, a).as_slice() {
            [first, .., last] => Some([*first, *last]),
            _ => None,
        }
    }

    /// Phase of one exchange measured in the vacuum channel.
    ///
    /// Counter-clockwise exchanges pick up the conjugate phase.
    fn braiding_phase(&self, clockwise: bool) -> Complex64 {
        let r = self
            .r_matrix(Charge::Vacuum)
            .unwrap_or_else(|| Complex64::new(1.0, 0.0));
        if clockwise { r } else { r.conj() }
    }

    /// Relative phase `arg(R_c / R_1)` between the two encoding channels,
    /// normalized into (−π, π].
    fn relative_braid_phase(&self) -> f64 {
        let Some([vacuum, other]) = self.fusion_channels() else {
            return 0.0;
        };
        match (self.r_matrix(vacuum), self.r_matrix(other)) {
            (Some(r0), Some(r1)) => normalize_angle((r1 / r0).arg()),
            _ => 0.0,
        }
    }
}

impl AnyonModel for AnyonType {
    fn encoding_charge(&self) -> Charge {
        match self {
            AnyonType::Ising => Charge::Sigma,
            AnyonType::Fibonacci => Charge::Tau,
        }
    }

    fn fuse(&self, a: Charge, b: Charge) -> Vec<Charge> {
        match self {
            AnyonType::Ising => match (a, b) {
                (Charge::Tau, _) | (_, Charge::Tau) => vec![],
                (Charge::Vacuum, x) | (x, Charge::Vacuum) => vec![x],
                (Charge::Sigma, Charge::Sigma) => vec![Charge::Vacuum, Charge::Psi],
                (Charge::Sigma, Charge::Psi) | (Charge::Psi, Charge::Sigma) => vec![Charge::Sigma],
                (Charge::Psi, Charge::Psi) => vec![Charge::Vacuum],
            },
            AnyonType::Fibonacci => match (a, b) {
                (Charge::Sigma | Charge::Psi, _) | (_, Charge::Sigma | Charge::Psi) => vec![],
                (Charge::Vacuum, x) | (x, Charge::Vacuum) => vec![x],
                (Charge::Tau, Charge::Tau) => vec![Charge::Vacuum, Charge::Tau],
            },
        }
    }

    fn r_matrix(&self, channel: Charge) -> Option<Complex64> {
        match (self, channel) {
            (AnyonType::Ising, Charge::Vacuum) => Some(Complex64::from_polar(1.0, -PI / 8.0)),
            (AnyonType::Ising, Charge::Psi) => Some(Complex64::from_polar(1.0, 3.0 * PI / 8.0)),
            (AnyonType::Fibonacci, Charge::Vacuum) => {
                Some(Complex64::from_polar(1.0, -4.0 * PI / 5.0))
            }
            (AnyonType::Fibonacci, Charge::Tau) => Some(Complex64::from_polar(1.0, 3.0 * PI / 5.0)),
            _ => None,
        }
    }

    fn f_matrix(&self) -> [Complex64; 4] {
        match self {
            AnyonType::Ising => {
                let s = Complex64::new(1.0 / 2.0_f64.sqrt(), 0.0);
                [s, s, s, -s]
            }
            AnyonType::Fibonacci => {
                let phi = f64::midpoint(1.0, 5.0_f64.sqrt());
                let a = Complex64::new(1.0 / phi, 0.0);
                let b = Complex64::new(1.0 / phi.sqrt(), 0.0);
                [a, b, b, -a]
            }
        }
    }
}

/// Normalize an angle into (−π, π].
pub fn normalize_angle(angle: f64) -> f64 {
    if angle.is_nan() || angle.is_infinite() {
        return 0.0;
    }
    let mut a = angle.rem_euclid(2.0 * PI);
    if a > PI {
        a -= 2.0 * PI;
    }
    a
}
