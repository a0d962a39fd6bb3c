use super::term::ForceEnergy;
use nalgebra::{Matrix3, Unit, Vector3};
use std::ops::AddAssign;

/// Electric field at the probe and its gradient `∂E_i/∂x_j`, in e/Å² and e/Å³.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElectricField {
    pub field: Vector3<f64>,
    pub gradient: Matrix3<f64>,
}

impl Default for ElectricField {
    fn default() -> Self {
        Self {
            field: Vector3::zeros(),
            gradient: Matrix3::zeros(),
        }
    }
}

impl ElectricField {
    #[inline]
    pub fn add_contribution(&mut self, field: Vector3<f64>, gradient: Matrix3<f64>) {
        self.field += field;
        self.gradient += gradient;
    }
}

impl AddAssign for ElectricField {
    fn add_assign(&mut self, other: Self) {
        self.add_contribution(other.field, other.gradient);
    }
}

/// Induced-dipole energy and force of a probe with scalar polarizability `alpha`.
///
/// `U = −½ α |E|²` and `F = −∇U = α (∇E)ᵀ E`. The polarizability carries the
/// Coulomb constant, so `alpha` is in kcal·Å⁴/(mol·e²).
#[inline]
pub fn isotropic_induction(field: &ElectricField, alpha: f64) -> ForceEnergy {
    let energy = -0.5 * alpha * field.field.norm_squared();
    let force = field.gradient.transpose() * field.field * alpha;
    ForceEnergy::new(force, energy)
}

/// Induced-dipole energy and force of a probe with polarizability tensor `alpha`
/// expressed in the lab frame.
///
/// `U = −½ Eᵀ α E` and `F = ½ (∇E)ᵀ (α + αᵀ) E`.
#[inline]
pub fn anisotropic_induction(field: &ElectricField, alpha: &Matrix3<f64>) -> ForceEnergy {
    let e = &field.field;
    let energy = -0.5 * e.dot(&(alpha * e));
    let symmetric = alpha + alpha.transpose();
    let force = field.gradient.transpose() * (symmetric * e) * 0.5;
    ForceEnergy::new(force, energy)
}

/// Rotation taking the molecular frame (axis along z) to the lab frame for a
/// molecular axis with polar angle `theta` and azimuth `phi`.
pub fn orientation_rotation(theta: f64, phi: f64) -> Matrix3<f64> {
    let (st, ct) = theta.sin_cos();
    let (sp, cp) = phi.sin_cos();
    Matrix3::new(
        cp * ct, -sp, cp * st, //
        sp * ct, cp, sp * st, //
        -st, 0.0, ct,
    )
}

/// Lab-frame polarizability tensor `R diag(α⊥, α⊥, α∥) Rᵀ` of a linear molecule
/// whose axis points along `axis`.
pub fn polarizability_tensor(axis: &Unit<Vector3<f64>>, axial: f64, radial: f64) -> Matrix3<f64> {
    let theta = axis.z.clamp(-1.0, 1.0).acos();
    let phi = axis.y.atan2(axis.x);
    let rotation = orientation_rotation(theta, phi);
    let body = Matrix3::from_diagonal(&Vector3::new(radial, radial, axial));
    rotation * body * rotation.transpose()
}
