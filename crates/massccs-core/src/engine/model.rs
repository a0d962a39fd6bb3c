use crate::core::models::target::DispersionSource;
use std::fmt;

/// Flavor of the induced-dipole term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polarization {
    /// Scalar polarizability, `U = −½ α |E|²`.
    Isotropic,
    /// Axial/radial polarizability rotated into the lab frame by the probe orientation.
    Anisotropic,
}

/// How candidate target atoms are enumerated for a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Acceleration {
    /// Loop over every target atom.
    BruteForce,
    /// Loop over the first and second neighbor shells of the query cell.
    #[default]
    CellList,
}

/// Combination of interaction terms summed for one probe site.
///
/// Each term is cutoff-truncated independently: dispersion at the
/// Lennard-Jones cutoff, Coulomb and induction at the Coulomb cutoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TermSet {
    pub dispersion: Option<DispersionSource>,
    pub coulomb: bool,
    pub polarization: Option<Polarization>,
}

impl TermSet {
    pub const fn new(
        dispersion: Option<DispersionSource>,
        coulomb: bool,
        polarization: Option<Polarization>,
    ) -> Self {
        Self {
            dispersion,
            coulomb,
            polarization,
        }
    }

    pub const fn lennard_jones() -> Self {
        Self::new(Some(DispersionSource::Peripheral), false, None)
    }

    pub const fn lennard_jones_central() -> Self {
        Self::new(Some(DispersionSource::Central), false, None)
    }

    pub const fn coulomb() -> Self {
        Self::new(None, true, None)
    }

    pub const fn lennard_jones_coulomb() -> Self {
        Self::new(Some(DispersionSource::Peripheral), true, None)
    }

    pub const fn lennard_jones_coulomb_central() -> Self {
        Self::new(Some(DispersionSource::Central), true, None)
    }

    /// Helium and other neutral monatomic probes.
    pub const fn lennard_jones_induced_dipole() -> Self {
        Self::new(
            Some(DispersionSource::Peripheral),
            false,
            Some(Polarization::Isotropic),
        )
    }

    /// Center site of a nitrogen probe.
    pub const fn coulomb_induced_dipole_isotropic() -> Self {
        Self::new(None, true, Some(Polarization::Isotropic))
    }

    pub const fn coulomb_induced_dipole_anisotropic() -> Self {
        Self::new(None, true, Some(Polarization::Anisotropic))
    }

    /// Center site of a carbon dioxide probe.
    pub const fn lennard_jones_coulomb_induced_dipole_isotropic_central() -> Self {
        Self::new(
            Some(DispersionSource::Central),
            true,
            Some(Polarization::Isotropic),
        )
    }

    pub const fn lennard_jones_coulomb_induced_dipole_anisotropic_central() -> Self {
        Self::new(
            Some(DispersionSource::Central),
            true,
            Some(Polarization::Anisotropic),
        )
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.dispersion.is_none() && !self.coulomb && self.polarization.is_none()
    }

    /// Whether any term depends on the target charges.
    #[inline]
    pub fn is_electrostatic(&self) -> bool {
        self.coulomb || self.polarization.is_some()
    }
}

impl fmt::Display for TermSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::with_capacity(3);
        match self.dispersion {
            Some(DispersionSource::Peripheral) => parts.push("lj"),
            Some(DispersionSource::Central) => parts.push("lj-central"),
            None => {}
        }
        if self.coulomb {
            parts.push("coulomb");
        }
        match self.polarization {
            Some(Polarization::Isotropic) => parts.push("induced-dipole"),
            Some(Polarization::Anisotropic) => parts.push("induced-dipole-aniso"),
            None => {}
        }
        if parts.is_empty() {
            f.write_str("none")
        } else {
            f.write_str(&parts.join("+"))
        }
    }
}

/// Terms to evaluate together with the enumeration strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct InteractionModel {
    pub terms: TermSet,
    pub acceleration: Acceleration,
}

impl InteractionModel {
    pub const fn new(terms: TermSet, acceleration: Acceleration) -> Self {
        Self {
            terms,
            acceleration,
        }
    }

    pub const fn brute_force(terms: TermSet) -> Self {
        Self::new(terms, Acceleration::BruteForce)
    }

    pub const fn cell_list(terms: TermSet) -> Self {
        Self::new(terms, Acceleration::CellList)
    }

    pub const fn with_acceleration(mut self, acceleration: Acceleration) -> Self {
        self.acceleration = acceleration;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn helium_preset_has_dispersion_and_isotropic_induction_only() {
        let terms = TermSet::lennard_jones_induced_dipole();
        assert_eq!(terms.dispersion, Some(DispersionSource::Peripheral));
        assert!(!terms.coulomb);
        assert_eq!(terms.polarization, Some(Polarization::Isotropic));
        assert!(terms.is_electrostatic());
    }

    #[test]
    fn central_presets_use_central_parameters() {
        for terms in [
            TermSet::lennard_jones_central(),
            TermSet::lennard_jones_coulomb_central(),
            TermSet::lennard_jones_coulomb_induced_dipole_isotropic_central(),
            TermSet::lennard_jones_coulomb_induced_dipole_anisotropic_central(),
        ] {
            assert_eq!(terms.dispersion, Some(DispersionSource::Central));
        }
    }

    #[test]
    fn default_term_set_is_empty() {
        assert!(TermSet::default().is_empty());
        assert!(!TermSet::lennard_jones().is_electrostatic());
    }

    #[test]
    fn display_lists_enabled_terms() {
        assert_eq!(TermSet::default().to_string(), "none");
        assert_eq!(
            TermSet::lennard_jones_coulomb_induced_dipole_anisotropic_central().to_string(),
            "lj-central+coulomb+induced-dipole-aniso"
        );
    }

    #[test]
    fn model_constructors_select_acceleration() {
        let model = InteractionModel::brute_force(TermSet::coulomb());
        assert_eq!(model.acceleration, Acceleration::BruteForce);
        assert_eq!(
            model.with_acceleration(Acceleration::CellList),
            InteractionModel::cell_list(TermSet::coulomb())
        );
    }
}
