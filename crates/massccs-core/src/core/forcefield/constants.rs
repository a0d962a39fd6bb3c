/// Coulomb constant in kcal·Å/(mol·e²).
pub const COULOMB_CONSTANT: f64 = 332.0637;

const BOLTZMANN_J_PER_K: f64 = 1.380649e-23;
const J_TO_EV: f64 = 6.241509074e18;
const EV_TO_KCAL_MOL: f64 = 23.060548;

/// Boltzmann constant in kcal/(mol·K).
pub const BOLTZMANN_CONSTANT: f64 = BOLTZMANN_J_PER_K * J_TO_EV * EV_TO_KCAL_MOL;

/// Temperature at which diatomic orientations are Boltzmann-averaged, in K.
pub const REFERENCE_TEMPERATURE: f64 = 500.0;

/// Physical constants bound to an evaluator for its whole lifetime.
///
/// Energies are in kcal/mol, distances in Angstroms and charges in units of
/// the elementary charge; the constants must use the same unit system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicalConstants {
    pub coulomb_constant: f64,
    pub boltzmann_constant: f64,
    pub averaging_temperature: f64,
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        Self {
            coulomb_constant: COULOMB_CONSTANT,
            boltzmann_constant: BOLTZMANN_CONSTANT,
            averaging_temperature: REFERENCE_TEMPERATURE,
        }
    }
}

impl PhysicalConstants {
    /// `k_B T` at the averaging temperature.
    #[inline]
    pub fn thermal_energy(&self) -> f64 {
        self.boltzmann_constant * self.averaging_temperature
    }
}
