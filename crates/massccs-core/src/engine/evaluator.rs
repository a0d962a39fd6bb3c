use super::config::EvaluatorConfig;
use super::error::{EngineError, EvaluationError};
use super::model::{Acceleration, InteractionModel, Polarization, TermSet};
use crate::core::forcefield::polarization::{
    ElectricField, anisotropic_induction, isotropic_induction, polarizability_tensor,
};
use crate::core::forcefield::potentials::{coulomb_shifted, lennard_jones_shifted, smoothed_field};
use crate::core::forcefield::term::ForceEnergy;
use crate::core::models::probe::{AnisotropicPolarizability, ProbeState};
use crate::core::models::target::TargetModel;
use crate::core::spatial::grid::SpatialGrid;
use nalgebra::{Matrix3, Point3, Unit, Vector3};
use tracing::debug;

/// Polarizability resolved for one query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Induction {
    None,
    Isotropic(f64),
    Tensor(Matrix3<f64>),
}

#[derive(Debug, Default)]
struct Accumulator {
    total: ForceEnergy,
    field: ElectricField,
}

/// Force engine: sums the selected interaction terms between one probe site
/// and the fixed target.
///
/// The evaluator borrows the target and the optional grid and holds only
/// immutable configuration, so a single instance can serve any number of
/// concurrent queries.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'a> {
    target: &'a TargetModel,
    grid: Option<&'a SpatialGrid>,
    config: EvaluatorConfig,
}

impl<'a> Evaluator<'a> {
    /// Builds an evaluator that supports both acceleration modes.
    ///
    /// The grid must index exactly the atoms of `target`, and its shells must
    /// reach the dispersion cutoff (first shell) and the Coulomb cutoff (both
    /// shells) so that cell-list queries see every atom brute force would.
    pub fn new(
        target: &'a TargetModel,
        grid: &'a SpatialGrid,
        config: EvaluatorConfig,
    ) -> Result<Self, EngineError> {
        if grid.atom_count() != target.len() {
            return Err(EngineError::GridMismatch {
                grid_atoms: grid.atom_count(),
                target_atoms: target.len(),
            });
        }

        let spec = grid.spec();
        if spec.first_radius < config.lj_cutoff || spec.second_radius < config.coul_cutoff {
            return Err(EngineError::GridTooSmall {
                first_radius: spec.first_radius,
                second_radius: spec.second_radius,
                lj_cutoff: config.lj_cutoff,
                coul_cutoff: config.coul_cutoff,
            });
        }

        debug!(
            atoms = target.len(),
            cells = grid.cell_count(),
            lj_cutoff = config.lj_cutoff,
            coul_cutoff = config.coul_cutoff,
            "Evaluator constructed with cell-list acceleration."
        );

        Ok(Self {
            target,
            grid: Some(grid),
            config,
        })
    }

    /// Builds an evaluator without a grid; only brute-force models can be evaluated.
    pub fn brute_force(target: &'a TargetModel, config: EvaluatorConfig) -> Self {
        debug!(
            atoms = target.len(),
            lj_cutoff = config.lj_cutoff,
            coul_cutoff = config.coul_cutoff,
            "Evaluator constructed without a spatial grid."
        );
        Self {
            target,
            grid: None,
            config,
        }
    }

    #[inline]
    pub fn target(&self) -> &'a TargetModel {
        self.target
    }

    #[inline]
    pub fn grid(&self) -> Option<&'a SpatialGrid> {
        self.grid
    }

    #[inline]
    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Force on and potential energy of probe site `site` under `model`.
    ///
    /// A cell-list query at a position outside the grid returns zero force and
    /// zero energy.
    pub fn evaluate(
        &self,
        probe: &ProbeState,
        site: usize,
        model: InteractionModel,
    ) -> Result<ForceEnergy, EvaluationError> {
        let probe_site = probe.site(site).ok_or(EvaluationError::SiteOutOfRange {
            index: site,
            site_count: probe.len(),
        })?;

        let induction = self.resolve_induction(model.terms.polarization, probe.anisotropy(), || {
            probe.orientation()
        })?;

        self.evaluate_at(
            &probe_site.position,
            probe_site.charge,
            model,
            induction,
        )
    }

    /// Chooses the polarizability used by the induced-dipole term.
    ///
    /// Anisotropic models fall back to the configured scalar `alpha` when the
    /// probe carries no axial/radial components, and to the scalar path when
    /// both components coincide.
    pub(crate) fn resolve_induction(
        &self,
        polarization: Option<Polarization>,
        anisotropy: Option<&AnisotropicPolarizability>,
        orientation: impl FnOnce() -> Option<Unit<Vector3<f64>>>,
    ) -> Result<Induction, EvaluationError> {
        let induction = match (polarization, anisotropy) {
            (None, _) => Induction::None,
            (Some(Polarization::Isotropic), _) | (Some(Polarization::Anisotropic), None) => {
                Induction::Isotropic(self.config.alpha)
            }
            (Some(Polarization::Anisotropic), Some(a)) if a.is_isotropic() => {
                Induction::Isotropic(a.axial)
            }
            (Some(Polarization::Anisotropic), Some(a)) => {
                let axis = orientation().ok_or(EvaluationError::DegenerateOrientation)?;
                Induction::Tensor(polarizability_tensor(&axis, a.axial, a.radial))
            }
        };
        Ok(induction)
    }

    /// Evaluates a point charge at `position` against the target.
    pub(crate) fn evaluate_at(
        &self,
        position: &Point3<f64>,
        charge: f64,
        model: InteractionModel,
        induction: Induction,
    ) -> Result<ForceEnergy, EvaluationError> {
        let terms = &model.terms;
        let mut acc = Accumulator::default();

        match model.acceleration {
            Acceleration::BruteForce => {
                for atom in 0..self.target.len() {
                    self.accumulate_pair(&mut acc, position, charge, atom, terms, true);
                }
            }
            Acceleration::CellList => {
                let grid = self.grid.ok_or(EvaluationError::GridUnavailable)?;
                let Some(cell) = grid.index_of(position) else {
                    return Ok(ForceEnergy::zero());
                };

                for &neighbor in grid.first_shell_neighbors(cell) {
                    for &atom in grid.atoms_in(neighbor) {
                        self.accumulate_pair(&mut acc, position, charge, atom, terms, true);
                    }
                }

                if terms.is_electrostatic() {
                    for &neighbor in grid.second_shell_neighbors(cell) {
                        for &atom in grid.atoms_in(neighbor) {
                            self.accumulate_pair(&mut acc, position, charge, atom, terms, false);
                        }
                    }
                }
            }
        }

        let induced = match induction {
            Induction::None => ForceEnergy::zero(),
            Induction::Isotropic(alpha) => isotropic_induction(&acc.field, alpha),
            Induction::Tensor(ref alpha) => anisotropic_induction(&acc.field, alpha),
        };

        Ok(acc.total + induced)
    }

    #[inline]
    fn accumulate_pair(
        &self,
        acc: &mut Accumulator,
        position: &Point3<f64>,
        charge: f64,
        atom: usize,
        terms: &TermSet,
        with_dispersion: bool,
    ) {
        let delta = position - self.target.position(atom);
        let r2 = delta.norm_squared();
        let lj_cutoff = self.config.lj_cutoff;
        let coul_cutoff = self.config.coul_cutoff;

        if with_dispersion {
            if let Some(source) = terms.dispersion {
                if r2 < lj_cutoff * lj_cutoff {
                    let coeffs = self.target.lj_coefficients(atom, source);
                    let pair = lennard_jones_shifted(r2, coeffs, lj_cutoff);
                    acc.total.energy += pair.energy;
                    acc.total.force += delta * pair.force_scale;
                }
            }
        }

        if !terms.is_electrostatic() || r2 >= coul_cutoff * coul_cutoff {
            return;
        }

        let r = r2.sqrt();
        let target_charge = self.target.charge(atom);

        if terms.coulomb {
            let kqq = self.config.constants.coulomb_constant * charge * target_charge;
            let pair = coulomb_shifted(r, r2, kqq, coul_cutoff);
            acc.total.energy += pair.energy;
            acc.total.force += delta * pair.force_scale;
        }

        if terms.polarization.is_some() {
            let (field, gradient) = smoothed_field(&delta, r, r2, target_charge, coul_cutoff);
            acc.field.add_contribution(field, gradient);
        }
    }
}
