use super::error::ModelError;
use nalgebra::Point3;

/// Lennard-Jones parameters of a target site as seen by one kind of probe site.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LennardJones {
    /// Well depth (epsilon) in kcal/mol.
    pub epsilon: f64,
    /// Zero-crossing distance (sigma) in Angstroms.
    pub sigma: f64,
}

impl LennardJones {
    pub fn new(epsilon: f64, sigma: f64) -> Self {
        Self { epsilon, sigma }
    }

    /// Returns the `(4εσ¹², 4εσ⁶)` coefficient pair used by the pair kernels.
    #[inline]
    pub fn coefficients(&self) -> LjCoefficients {
        let c6 = 4.0 * self.epsilon * self.sigma.powi(6);
        LjCoefficients {
            c12: c6 * self.sigma.powi(6),
            c6,
        }
    }
}

/// Precomputed repulsive and dispersive coefficients of a 12-6 potential.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LjCoefficients {
    pub c12: f64,
    pub c6: f64,
}

/// Selects which Lennard-Jones parameter set of a target atom a probe site uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DispersionSource {
    /// Generic parameters, used by monatomic probes and the peripheral sites of diatomics.
    #[default]
    Peripheral,
    /// Parameters of the united-atom backbone site (e.g. the carbon of CO2).
    Central,
}

/// A single atom of the fixed target molecule.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetAtom {
    /// Position in Angstroms.
    pub position: Point3<f64>,
    /// Partial charge in elementary charge units.
    pub charge: f64,
    /// Parameters against generic probe sites.
    pub lj: LennardJones,
    /// Parameters against a central backbone probe site.
    pub lj_central: LennardJones,
}

impl TargetAtom {
    /// Creates an atom whose central parameters equal its peripheral ones.
    pub fn new(position: Point3<f64>, charge: f64, lj: LennardJones) -> Self {
        Self {
            position,
            charge,
            lj,
            lj_central: lj,
        }
    }

    pub fn with_central(mut self, lj_central: LennardJones) -> Self {
        self.lj_central = lj_central;
        self
    }
}

/// Immutable description of the target molecule.
///
/// Positions are kept next to the precomputed Lennard-Jones coefficients so the
/// force kernels never recompute `σ⁶` in the inner loop. The model is built once
/// and shared read-only by every evaluator and every concurrent probe query.
#[derive(Debug, Clone)]
pub struct TargetModel {
    atoms: Vec<TargetAtom>,
    peripheral: Vec<LjCoefficients>,
    central: Vec<LjCoefficients>,
}

impl TargetModel {
    pub fn new(atoms: Vec<TargetAtom>) -> Result<Self, ModelError> {
        if atoms.is_empty() {
            return Err(ModelError::EmptyTarget);
        }

        for (index, atom) in atoms.iter().enumerate() {
            let p = &atom.position;
            if !(p.x.is_finite() && p.y.is_finite() && p.z.is_finite() && atom.charge.is_finite())
            {
                return Err(ModelError::NonFiniteAtom { index });
            }
            for params in [&atom.lj, &atom.lj_central] {
                if !(params.epsilon >= 0.0 && params.sigma >= 0.0)
                    || !params.epsilon.is_finite()
                    || !params.sigma.is_finite()
                {
                    return Err(ModelError::InvalidDispersion {
                        index,
                        epsilon: params.epsilon,
                        sigma: params.sigma,
                    });
                }
            }
        }

        let peripheral = atoms.iter().map(|a| a.lj.coefficients()).collect();
        let central = atoms.iter().map(|a| a.lj_central.coefficients()).collect();

        Ok(Self {
            atoms,
            peripheral,
            central,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn atoms(&self) -> &[TargetAtom] {
        &self.atoms
    }

    #[inline]
    pub fn atom(&self, index: usize) -> Option<&TargetAtom> {
        self.atoms.get(index)
    }

    #[inline]
    pub(crate) fn position(&self, index: usize) -> &Point3<f64> {
        &self.atoms[index].position
    }

    #[inline]
    pub(crate) fn charge(&self, index: usize) -> f64 {
        self.atoms[index].charge
    }

    #[inline]
    pub(crate) fn lj_coefficients(&self, index: usize, source: DispersionSource) -> LjCoefficients {
        match source {
            DispersionSource::Peripheral => self.peripheral[index],
            DispersionSource::Central => self.central[index],
        }
    }

    /// Axis-aligned bounding box `(min, max)` of all atom positions.
    pub fn bounding_box(&self) -> (Point3<f64>, Point3<f64>) {
        let first = self.atoms[0].position;
        self.atoms
            .iter()
            .fold((first, first), |(min, max), atom| {
                (min.inf(&atom.position), max.sup(&atom.position))
            })
    }

    pub fn total_charge(&self) -> f64 {
        self.atoms.iter().map(|a| a.charge).sum()
    }
}
