use super::error::EvaluationError;
use super::evaluator::Evaluator;
use super::model::{Acceleration, InteractionModel, Polarization, TermSet};
use crate::core::forcefield::term::ForceEnergy;
use crate::core::models::probe::ProbeState;
use nalgebra::{Unit, Vector3};

/// Interaction terms of a rigid linear diatomic probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DiatomicModel {
    /// Terms of the center site.
    pub center: TermSet,
    /// Terms of each of the two off-center sites.
    pub sites: TermSet,
    /// Index of the center site within the probe.
    pub center_site: usize,
}

impl DiatomicModel {
    pub const fn new(center: TermSet, sites: TermSet) -> Self {
        Self {
            center,
            sites,
            center_site: 0,
        }
    }

    /// Nitrogen: a charged, polarizable massless center and two Lennard-Jones nitrogens.
    pub const fn nitrogen() -> Self {
        Self::new(
            TermSet::coulomb_induced_dipole_isotropic(),
            TermSet::lennard_jones_coulomb(),
        )
    }

    /// Carbon dioxide: a carbon center with its own dispersion parameters and two oxygens.
    pub const fn carbon_dioxide() -> Self {
        Self::new(
            TermSet::lennard_jones_coulomb_induced_dipole_isotropic_central(),
            TermSet::lennard_jones_coulomb(),
        )
    }

    /// Nitrogen with an axial/radial polarizability on the center site.
    pub const fn nitrogen_anisotropic() -> Self {
        Self::new(
            TermSet::coulomb_induced_dipole_anisotropic(),
            TermSet::lennard_jones_coulomb(),
        )
    }

    /// Carbon dioxide with an axial/radial polarizability on the carbon.
    pub const fn carbon_dioxide_anisotropic() -> Self {
        Self::new(
            TermSet::lennard_jones_coulomb_induced_dipole_anisotropic_central(),
            TermSet::lennard_jones_coulomb(),
        )
    }

    pub const fn with_center_site(mut self, center_site: usize) -> Self {
        self.center_site = center_site;
        self
    }
}

/// Per-axis breakdown of an orientation-averaged query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisAverage {
    /// Boltzmann-weighted force and energy.
    pub averaged: ForceEnergy,
    /// Total force and energy with the molecular axis along x, y and z.
    pub candidates: [ForceEnergy; 3],
    pub weights: [f64; 3],
}

/// Approximates the unresolved orientation of a linear diatomic probe by
/// Boltzmann-averaging three placements of its off-center sites, one along
/// each coordinate axis.
///
/// Each off-center site is looked up in the grid on its own, so a placement
/// whose site leaves the grid loses only that site's contribution. An
/// anisotropic center is evaluated once per placement with the molecular axis
/// along the placement axis; any other center term is computed once.
#[derive(Debug, Clone, Copy)]
pub struct OrientationAverager<'e, 'a> {
    evaluator: &'e Evaluator<'a>,
    model: DiatomicModel,
    acceleration: Acceleration,
}

impl<'e, 'a> OrientationAverager<'e, 'a> {
    pub fn new(
        evaluator: &'e Evaluator<'a>,
        model: DiatomicModel,
        acceleration: Acceleration,
    ) -> Self {
        Self {
            evaluator,
            model,
            acceleration,
        }
    }

    #[inline]
    pub fn model(&self) -> &DiatomicModel {
        &self.model
    }

    /// Orientation-averaged force and energy of `probe`.
    pub fn average(&self, probe: &ProbeState) -> Result<ForceEnergy, EvaluationError> {
        self.average_detailed(probe).map(|result| result.averaged)
    }

    pub fn average_detailed(&self, probe: &ProbeState) -> Result<AxisAverage, EvaluationError> {
        let center_index = self.model.center_site;
        let center = probe
            .site(center_index)
            .ok_or(EvaluationError::SiteOutOfRange {
                index: center_index,
                site_count: probe.len(),
            })?;
        let bond_length = probe
            .bond_length()
            .ok_or(EvaluationError::MissingBondLength)?;

        let center_model = InteractionModel::new(self.model.center, self.acceleration);
        let oriented_center = self.model.center.polarization == Some(Polarization::Anisotropic)
            && probe.anisotropy().is_some_and(|a| !a.is_isotropic());
        let fixed_center = if oriented_center {
            None
        } else {
            let induction = self.evaluator.resolve_induction(
                self.model.center.polarization,
                probe.anisotropy(),
                || None,
            )?;
            Some(self.evaluator.evaluate_at(
                &center.position,
                center.charge,
                center_model,
                induction,
            )?)
        };

        let site_charge = -0.5 * center.charge;
        let site_model = InteractionModel::new(self.model.sites, self.acceleration);
        let half = 0.5 * bond_length;

        let mut candidates = [ForceEnergy::zero(); 3];
        for (axis, candidate) in candidates.iter_mut().enumerate() {
            let direction = Unit::new_unchecked(Vector3::ith(axis, 1.0));
            let center_term = match fixed_center {
                Some(term) => term,
                None => {
                    let induction = self.evaluator.resolve_induction(
                        self.model.center.polarization,
                        probe.anisotropy(),
                        || Some(direction),
                    )?;
                    self.evaluator.evaluate_at(
                        &center.position,
                        center.charge,
                        center_model,
                        induction,
                    )?
                }
            };

            let induction = self.evaluator.resolve_induction(
                self.model.sites.polarization,
                probe.anisotropy(),
                || Some(direction),
            )?;

            let offset = direction.into_inner() * half;
            let first = self.evaluator.evaluate_at(
                &(center.position + offset),
                site_charge,
                site_model,
                induction,
            )?;
            let second = self.evaluator.evaluate_at(
                &(center.position - offset),
                site_charge,
                site_model,
                induction,
            )?;

            *candidate = center_term + first + second;
        }

        let energies = candidates.map(|c| c.energy);
        let thermal_energy = self.evaluator.config().constants.thermal_energy();
        let weights = boltzmann_weights(&energies, thermal_energy);
        let averaged = candidates
            .iter()
            .zip(weights)
            .map(|(candidate, weight)| *candidate * weight)
            .sum();

        Ok(AxisAverage {
            averaged,
            candidates,
            weights,
        })
    }
}

/// Normalized Boltzmann weights `exp(−(U_i − U_min)/kT) / Σ exp(−(U_j − U_min)/kT)`.
///
/// Energies are shifted by their minimum before exponentiation; the weights
/// are unchanged by the shift but never overflow.
pub fn boltzmann_weights<const N: usize>(energies: &[f64; N], thermal_energy: f64) -> [f64; N] {
    let minimum = energies.iter().copied().fold(f64::INFINITY, f64::min);
    let mut weights = energies.map(|u| (-(u - minimum) / thermal_energy).exp());
    let norm: f64 = weights.iter().sum();
    for w in &mut weights {
        *w /= norm;
    }
    weights
}

/// Boltzmann-weighted average of candidate force/energy pairs.
pub fn boltzmann_average<const N: usize>(
    candidates: &[ForceEnergy; N],
    thermal_energy: f64,
) -> ForceEnergy {
    let energies = candidates.map(|c| c.energy);
    boltzmann_weights(&energies, thermal_energy)
        .iter()
        .zip(candidates)
        .map(|(&w, c)| *c * w)
        .sum()
}
