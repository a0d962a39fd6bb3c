use super::error::ModelError;
use nalgebra::{Point3, Unit, Vector3};

/// One interaction site of the gas probe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeSite {
    /// Position in Angstroms.
    pub position: Point3<f64>,
    /// Charge in elementary charge units.
    pub charge: f64,
}

impl ProbeSite {
    pub fn new(position: Point3<f64>, charge: f64) -> Self {
        Self { position, charge }
    }
}

/// Polarizability of a linear molecule resolved along and across its axis, in
/// the same Coulomb-scaled units as the evaluator's scalar `alpha`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnisotropicPolarizability {
    pub axial: f64,
    pub radial: f64,
}

impl AnisotropicPolarizability {
    pub fn new(axial: f64, radial: f64) -> Result<Self, ModelError> {
        let valid = |v: f64| v.is_finite() && v >= 0.0;
        if !valid(axial) || !valid(radial) {
            return Err(ModelError::InvalidPolarizability { axial, radial });
        }
        Ok(Self { axial, radial })
    }

    #[inline]
    pub fn is_isotropic(&self) -> bool {
        self.axial == self.radial
    }
}

/// Instantaneous state of the gas probe, owned and updated by the integrator.
///
/// A monatomic probe has a single site. Multi-site probes additionally carry the
/// bond length used to place off-center sites, an optional anisotropic
/// polarizability, and the pair of sites whose separation defines the molecular
/// axis (sites 0 and 1 unless overridden).
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeState {
    sites: Vec<ProbeSite>,
    bond_length: Option<f64>,
    anisotropy: Option<AnisotropicPolarizability>,
    axis: [usize; 2],
}

impl ProbeState {
    pub fn new(sites: Vec<ProbeSite>) -> Result<Self, ModelError> {
        if sites.is_empty() {
            return Err(ModelError::EmptyProbe);
        }
        for (index, site) in sites.iter().enumerate() {
            if !(is_finite_point(&site.position) && site.charge.is_finite()) {
                return Err(ModelError::NonFiniteSite { index });
            }
        }
        Ok(Self {
            sites,
            bond_length: None,
            anisotropy: None,
            axis: [0, 1],
        })
    }

    /// Single-site probe such as helium or a charged pseudo-atom.
    pub fn monatomic(position: Point3<f64>, charge: f64) -> Result<Self, ModelError> {
        Self::new(vec![ProbeSite::new(position, charge)])
    }

    /// Diatomic probe described by its center site only; the off-center
    /// sites are placed by the orientation averager.
    pub fn diatomic_center(
        center: Point3<f64>,
        center_charge: f64,
        bond_length: f64,
    ) -> Result<Self, ModelError> {
        Self::new(vec![ProbeSite::new(center, center_charge)])?.with_bond_length(bond_length)
    }

    pub fn with_bond_length(mut self, bond_length: f64) -> Result<Self, ModelError> {
        if !(bond_length.is_finite() && bond_length > 0.0) {
            return Err(ModelError::InvalidBondLength(bond_length));
        }
        self.bond_length = Some(bond_length);
        Ok(self)
    }

    pub fn with_anisotropy(mut self, anisotropy: AnisotropicPolarizability) -> Self {
        self.anisotropy = Some(anisotropy);
        self
    }

    pub fn with_axis(mut self, first: usize, second: usize) -> Result<Self, ModelError> {
        let site_count = self.sites.len();
        if first == second || first >= site_count || second >= site_count {
            return Err(ModelError::InvalidAxis {
                first,
                second,
                site_count,
            });
        }
        self.axis = [first, second];
        Ok(self)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    pub fn sites(&self) -> &[ProbeSite] {
        &self.sites
    }

    #[inline]
    pub fn site(&self, index: usize) -> Option<&ProbeSite> {
        self.sites.get(index)
    }

    #[inline]
    pub fn bond_length(&self) -> Option<f64> {
        self.bond_length
    }

    #[inline]
    pub fn anisotropy(&self) -> Option<&AnisotropicPolarizability> {
        self.anisotropy.as_ref()
    }

    /// Unit vector pointing from the second axis site to the first one.
    ///
    /// Returns `None` for single-site probes or when both axis sites coincide.
    pub fn orientation(&self) -> Option<Unit<Vector3<f64>>> {
        let [a, b] = self.axis;
        let first = self.sites.get(a)?;
        let second = self.sites.get(b)?;
        Unit::try_new(first.position - second.position, f64::EPSILON)
    }

    /// Moves a single site; the integrator calls this once per step.
    ///
    /// The probe is left untouched when the index is out of range or the new
    /// position is not finite.
    pub fn set_site_position(
        &mut self,
        index: usize,
        position: Point3<f64>,
    ) -> Result<(), ModelError> {
        let site_count = self.sites.len();
        let site = self
            .sites
            .get_mut(index)
            .ok_or(ModelError::SiteOutOfRange { index, site_count })?;
        if !is_finite_point(&position) {
            return Err(ModelError::NonFiniteSite { index });
        }
        site.position = position;
        Ok(())
    }

    /// Rigidly translates every site by `displacement`.
    ///
    /// Fails without moving anything if any translated site would leave the
    /// finite range.
    pub fn translate(&mut self, displacement: &Vector3<f64>) -> Result<(), ModelError> {
        if let Some(index) = self
            .sites
            .iter()
            .position(|site| !is_finite_point(&(site.position + *displacement)))
        {
            return Err(ModelError::NonFiniteSite { index });
        }
        for site in &mut self.sites {
            site.position += displacement;
        }
        Ok(())
    }
}

#[inline]
fn is_finite_point(p: &Point3<f64>) -> bool {
    p.x.is_finite() && p.y.is_finite() && p.z.is_finite()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nitrogen_pair() -> ProbeState {
        ProbeState::new(vec![
            ProbeSite::new(Point3::new(0.0, 0.0, 0.55), -0.4),
            ProbeSite::new(Point3::new(0.0, 0.0, -0.55), -0.4),
            ProbeSite::new(Point3::origin(), 0.8),
        ])
        .unwrap()
    }

    #[test]
    fn new_rejects_empty_probe() {
        assert_eq!(ProbeState::new(Vec::new()), Err(ModelError::EmptyProbe));
    }

    #[test]
    fn new_rejects_non_finite_charge() {
        let result = ProbeState::new(vec![ProbeSite::new(Point3::origin(), f64::INFINITY)]);
        assert_eq!(result, Err(ModelError::NonFiniteSite { index: 0 }));
    }

    #[test]
    fn with_bond_length_rejects_zero() {
        let probe = ProbeState::monatomic(Point3::origin(), 0.0).unwrap();
        assert_eq!(
            probe.with_bond_length(0.0),
            Err(ModelError::InvalidBondLength(0.0))
        );
    }

    #[test]
    fn with_axis_rejects_out_of_range_site() {
        let probe = ProbeState::monatomic(Point3::origin(), 0.0).unwrap();
        assert!(matches!(
            probe.with_axis(0, 1),
            Err(ModelError::InvalidAxis { site_count: 1, .. })
        ));
    }

    #[test]
    fn orientation_points_from_second_axis_site_to_first() {
        let orientation = nitrogen_pair().orientation().unwrap();
        assert!((orientation.into_inner() - Vector3::z()).norm() < 1e-12);
    }

    #[test]
    fn orientation_is_none_for_monatomic_probe() {
        assert!(ProbeState::monatomic(Point3::origin(), 1.0)
            .unwrap()
            .orientation().is_none());
    }

    #[test]
    fn translate_moves_all_sites_rigidly() {
        let mut probe = nitrogen_pair();
        probe.translate(&Vector3::new(1.0, 2.0, 3.0)).unwrap();
        assert_eq!(probe.sites()[2].position, Point3::new(1.0, 2.0, 3.0));
        assert_eq!(probe.sites()[0].position, Point3::new(1.0, 2.0, 3.55));
    }

    #[test]
    fn monatomic_rejects_non_finite_position() {
        let result = ProbeState::monatomic(Point3::new(f64::NAN, 0.0, 0.0), -1.0);
        assert_eq!(result, Err(ModelError::NonFiniteSite { index: 0 }));
    }

    #[test]
    fn set_site_position_rejects_non_finite_position_and_keeps_site() {
        let mut probe = nitrogen_pair();
        let before = probe.clone();
        assert_eq!(
            probe.set_site_position(1, Point3::new(0.0, f64::INFINITY, 0.0)),
            Err(ModelError::NonFiniteSite { index: 1 })
        );
        assert_eq!(probe, before);
    }

    #[test]
    fn set_site_position_rejects_unknown_site() {
        let mut probe = nitrogen_pair();
        assert_eq!(
            probe.set_site_position(3, Point3::origin()),
            Err(ModelError::SiteOutOfRange {
                index: 3,
                site_count: 3
            })
        );
        probe.set_site_position(2, Point3::new(0.0, 1.0, 0.0)).unwrap();
        assert_eq!(probe.sites()[2].position, Point3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn translate_by_non_finite_displacement_fails_without_moving() {
        let mut probe = nitrogen_pair();
        let before = probe.clone();
        assert_eq!(
            probe.translate(&Vector3::new(f64::NAN, 0.0, 0.0)),
            Err(ModelError::NonFiniteSite { index: 0 })
        );
        assert_eq!(probe, before);
    }

    #[test]
    fn anisotropic_polarizability_rejects_negative_component() {
        assert!(AnisotropicPolarizability::new(-1.0, 1.0).is_err());
        assert!(AnisotropicPolarizability::new(2.2, 1.5).is_ok());
    }
}
