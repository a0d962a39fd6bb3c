use crate::core::forcefield::constants::PhysicalConstants;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid value for parameter '{name}': {value}")]
    InvalidParameter { name: &'static str, value: f64 },
}

/// Run-wide interaction parameters bound to an evaluator at construction.
///
/// Cutoffs are in Angstroms and must be positive. An infinite cutoff disables
/// truncation (and every cutoff shift) and is only usable without a grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvaluatorConfig {
    pub lj_cutoff: f64,
    pub coul_cutoff: f64,
    /// Isotropic polarizability of the probe scaled by the Coulomb constant,
    /// in kcal·Å⁴/(mol·e²).
    pub alpha: f64,
    pub constants: PhysicalConstants,
}

impl EvaluatorConfig {
    /// The larger of the two cutoffs, which bounds every interaction.
    #[inline]
    pub fn max_cutoff(&self) -> f64 {
        self.lj_cutoff.max(self.coul_cutoff)
    }
}

#[derive(Default)]
pub struct EvaluatorConfigBuilder {
    lj_cutoff: Option<f64>,
    coul_cutoff: Option<f64>,
    alpha: Option<f64>,
    constants: Option<PhysicalConstants>,
}

impl EvaluatorConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lj_cutoff(mut self, cutoff: f64) -> Self {
        self.lj_cutoff = Some(cutoff);
        self
    }
    pub fn coul_cutoff(mut self, cutoff: f64) -> Self {
        self.coul_cutoff = Some(cutoff);
        self
    }
    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = Some(alpha);
        self
    }
    pub fn constants(mut self, constants: PhysicalConstants) -> Self {
        self.constants = Some(constants);
        self
    }

    pub fn build(self) -> Result<EvaluatorConfig, ConfigError> {
        let lj_cutoff = self
            .lj_cutoff
            .ok_or(ConfigError::MissingParameter("lj_cutoff"))?;
        let coul_cutoff = self
            .coul_cutoff
            .ok_or(ConfigError::MissingParameter("coul_cutoff"))?;
        let alpha = self.alpha.ok_or(ConfigError::MissingParameter("alpha"))?;
        let constants = self.constants.unwrap_or_default();

        check_positive("lj_cutoff", lj_cutoff, true)?;
        check_positive("coul_cutoff", coul_cutoff, true)?;
        if !(alpha.is_finite() && alpha >= 0.0) {
            return Err(ConfigError::InvalidParameter {
                name: "alpha",
                value: alpha,
            });
        }
        check_positive("coulomb_constant", constants.coulomb_constant, false)?;
        check_positive("boltzmann_constant", constants.boltzmann_constant, false)?;
        check_positive(
            "averaging_temperature",
            constants.averaging_temperature,
            false,
        )?;

        Ok(EvaluatorConfig {
            lj_cutoff,
            coul_cutoff,
            alpha,
            constants,
        })
    }
}

fn check_positive(name: &'static str, value: f64, allow_infinite: bool) -> Result<(), ConfigError> {
    let finite_ok = allow_infinite || value.is_finite();
    if value > 0.0 && finite_ok {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter { name, value })
    }
}
