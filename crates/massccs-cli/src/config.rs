use crate::cli::RunArgs;
use crate::error::{CliError, Result};
use clap::ValueEnum;
use massccs::core::forcefield::constants::PhysicalConstants;
use massccs::core::models::probe::AnisotropicPolarizability;
use massccs::core::spatial::grid::GridSpec;
use massccs::engine::config::{EvaluatorConfig, EvaluatorConfigBuilder};
use massccs::engine::model::Acceleration;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

const DEFAULT_LJ_CUTOFF: f64 = 12.0;
const DEFAULT_COUL_CUTOFF: f64 = 25.0;

/// Gas species supported by the front-end.
#[derive(Deserialize, ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Species {
    He,
    N2,
    Co2,
}

impl Species {
    /// Polarizability volume in Å³.
    pub fn default_polarizability(self) -> f64 {
        match self {
            Species::He => 0.204956,
            Species::N2 => 1.7403,
            Species::Co2 => 2.507,
        }
    }

    /// Charge of the center site; off-center sites carry minus half of it.
    pub fn default_charge(self) -> f64 {
        match self {
            Species::He => 0.0,
            Species::N2 => 0.9650,
            Species::Co2 => 0.6512,
        }
    }

    /// Distance between the two off-center sites in Å.
    pub fn default_bond_length(self) -> Option<f64> {
        match self {
            Species::He => None,
            Species::N2 => Some(1.0976),
            Species::Co2 => Some(2.3244),
        }
    }

    pub fn is_diatomic(self) -> bool {
        !matches!(self, Species::He)
    }
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
enum PartialAcceleration {
    #[default]
    CellList,
    BruteForce,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialInteractionConfig {
    lj_cutoff: Option<f64>,
    coul_cutoff: Option<f64>,
    temperature: Option<f64>,
}

#[derive(Deserialize, Debug, Clone, Copy)]
#[serde(deny_unknown_fields)]
struct PartialAnisotropy {
    axial: f64,
    radial: f64,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialProbeConfig {
    species: Option<Species>,
    charge: Option<f64>,
    bond_length: Option<f64>,
    polarizability: Option<f64>,
    anisotropic_polarizability: Option<PartialAnisotropy>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialGridConfig {
    cell_size: Option<f64>,
    padding: Option<f64>,
}

/// Run configuration as read from a TOML file; every field is optional.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct PartialRunConfig {
    acceleration: Option<PartialAcceleration>,
    #[serde(default)]
    interaction: PartialInteractionConfig,
    #[serde(default)]
    probe: PartialProbeConfig,
    #[serde(default)]
    grid: PartialGridConfig,
}

/// Probe description after defaults and overrides are applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeConfig {
    pub species: Species,
    pub charge: f64,
    pub bond_length: Option<f64>,
    pub anisotropy: Option<AnisotropicPolarizability>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub evaluator: EvaluatorConfig,
    pub probe: ProbeConfig,
    pub acceleration: Acceleration,
    pub grid: GridSpec,
}

impl PartialRunConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content).map_err(|source| CliError::FileParsing {
            path: path.to_path_buf(),
            source,
        })
    }

    fn from_toml(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Applies command-line overrides and defaults, then validates the result.
    pub fn merge_with_cli(self, args: &RunArgs) -> Result<RunConfig> {
        let species = args
            .species
            .or(self.probe.species)
            .unwrap_or(Species::He);
        debug!("Resolved probe species: {:?}", species);

        let lj_cutoff = args
            .lj_cutoff
            .or(self.interaction.lj_cutoff)
            .unwrap_or(DEFAULT_LJ_CUTOFF);
        let coul_cutoff = args
            .coul_cutoff
            .or(self.interaction.coul_cutoff)
            .unwrap_or(DEFAULT_COUL_CUTOFF);

        let mut constants = PhysicalConstants::default();
        if let Some(temperature) = self.interaction.temperature {
            constants.averaging_temperature = temperature;
        }

        let polarizability = args
            .polarizability
            .or(self.probe.polarizability)
            .unwrap_or_else(|| species.default_polarizability());

        let evaluator = EvaluatorConfigBuilder::new()
            .lj_cutoff(lj_cutoff)
            .coul_cutoff(coul_cutoff)
            .alpha(polarizability * constants.coulomb_constant)
            .constants(constants)
            .build()?;

        let anisotropy = match self.probe.anisotropic_polarizability {
            None => None,
            Some(_) if !species.is_diatomic() => {
                return Err(CliError::Config(
                    "Anisotropic polarizability is only meaningful for diatomic probes".into(),
                ));
            }
            Some(a) => Some(AnisotropicPolarizability::new(
                a.axial * constants.coulomb_constant,
                a.radial * constants.coulomb_constant,
            )?),
        };

        let bond_length = self.probe.bond_length.or(species.default_bond_length());
        if !species.is_diatomic() && self.probe.bond_length.is_some() {
            return Err(CliError::Config(
                "A bond length cannot be set for a monatomic probe".into(),
            ));
        }

        let probe = ProbeConfig {
            species,
            charge: args
                .charge
                .or(self.probe.charge)
                .unwrap_or_else(|| species.default_charge()),
            bond_length,
            anisotropy,
        };

        let acceleration = if args.brute_force {
            Acceleration::BruteForce
        } else {
            match self.acceleration.unwrap_or_default() {
                PartialAcceleration::CellList => Acceleration::CellList,
                PartialAcceleration::BruteForce => Acceleration::BruteForce,
            }
        };

        let mut grid = GridSpec::for_cutoffs(lj_cutoff, coul_cutoff);
        if let Some(cell_size) = self.grid.cell_size {
            grid = grid.with_cell_size(cell_size);
        }
        if let Some(padding) = self.grid.padding {
            if padding < evaluator.max_cutoff() {
                return Err(CliError::Config(format!(
                    "Grid padding {} is smaller than the largest cutoff {}",
                    padding,
                    evaluator.max_cutoff()
                )));
            }
            grid = grid.with_padding(padding);
        }

        Ok(RunConfig {
            evaluator,
            probe,
            acceleration,
            grid,
        })
    }
}
