use crate::core::models::target::LjCoefficients;
use nalgebra::{Matrix3, Vector3};

/// Energy of one probe/target pair and the radial force factor `f/r`, so the
/// force on the probe is `force_scale * (r_probe - r_target)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PairTerm {
    pub energy: f64,
    pub force_scale: f64,
}

/// 12-6 Lennard-Jones with the energy shifted to zero at `cutoff`.
///
/// The force is the plain Lennard-Jones force. An infinite cutoff gives the
/// unshifted potential.
#[inline]
pub fn lennard_jones_shifted(r2: f64, coeffs: LjCoefficients, cutoff: f64) -> PairTerm {
    let r2inv = 1.0 / r2;
    let r6inv = r2inv * r2inv * r2inv;
    let rc6inv = 1.0 / cutoff.powi(6);

    let energy = r6inv * (coeffs.c12 * r6inv - coeffs.c6);
    let energy_at_cutoff = rc6inv * (coeffs.c12 * rc6inv - coeffs.c6);
    let force_scale = r6inv * (12.0 * coeffs.c12 * r6inv - 6.0 * coeffs.c6) * r2inv;

    PairTerm {
        energy: energy - energy_at_cutoff,
        force_scale,
    }
}

/// Coulomb interaction with the cubic shift
/// `-3/2 k q q'/r_c + 1/2 k q q' r²/r_c³` that brings energy and its radial
/// derivative to zero at `cutoff`.
///
/// `kqq` is the product of the Coulomb constant and both charges.
#[inline]
pub fn coulomb_shifted(r: f64, r2: f64, kqq: f64, cutoff: f64) -> PairTerm {
    let bare = kqq / r;
    let shift = -1.5 * kqq / cutoff + 0.5 * kqq * r2 / cutoff.powi(3);
    let force_scale = bare / r2 * (1.0 - (r / cutoff).powi(3));

    PairTerm {
        energy: bare + shift,
        force_scale,
    }
}

/// Electric field of a point charge at the probe and its gradient tensor.
///
/// The field `q d (1/r³ − 1/r_c³)` carries the same cubic smoothing as the
/// shifted Coulomb energy, and the returned gradient is its exact derivative:
/// `∂E_i/∂x_j = q (1/r³ − 1/r_c³) δ_ij − 3 q d_i d_j / r⁵`.
#[inline]
pub fn smoothed_field(
    delta: &Vector3<f64>,
    r: f64,
    r2: f64,
    charge: f64,
    cutoff: f64,
) -> (Vector3<f64>, Matrix3<f64>) {
    let r2inv = 1.0 / r2;
    let r3inv = r2inv / r;
    let r5inv = r3inv * r2inv;
    let smooth = 1.0 - r * r2 / cutoff.powi(3);

    let qr3 = charge * r3inv * smooth;
    let field = delta * qr3;
    let gradient =
        Matrix3::from_diagonal_element(qr3) - (delta * delta.transpose()) * (3.0 * charge * r5inv);

    (field, gradient)
}
