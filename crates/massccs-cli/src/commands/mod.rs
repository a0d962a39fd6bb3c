pub mod eval;
pub mod scan;

use crate::cli::RunArgs;
use crate::config::{PartialRunConfig, RunConfig, Species};
use crate::data::load_target;
use crate::error::{CliError, Result};
use massccs::core::models::probe::ProbeState;
use massccs::core::models::target::{DispersionSource, TargetModel};
use massccs::core::spatial::grid::SpatialGrid;
use massccs::engine::averaging::DiatomicModel;
use massccs::engine::evaluator::Evaluator;
use massccs::engine::model::{Acceleration, InteractionModel, Polarization, TermSet};
use massccs::workflows::scan::ScanQuery;
use nalgebra::Point3;
use tracing::{debug, info};

/// Everything a subcommand needs to query the target: the resolved
/// configuration, the loaded molecule and, for cell-list runs, its grid.
pub struct Session {
    pub config: RunConfig,
    target: TargetModel,
    grid: Option<SpatialGrid>,
}

impl Session {
    pub fn prepare(args: &RunArgs) -> Result<Self> {
        let partial = match &args.config {
            Some(path) => {
                info!("Loading run configuration from {:?}", path);
                PartialRunConfig::from_file(path)?
            }
            None => PartialRunConfig::default(),
        };
        let config = partial.merge_with_cli(args)?;
        debug!("Resolved run configuration: {:?}", config);

        info!("Loading target molecule from {:?}", &args.target);
        let target = load_target(&args.target)?;

        let grid = match config.acceleration {
            Acceleration::CellList => {
                let grid = SpatialGrid::build(&target, config.grid)?;
                info!(
                    cells = grid.cell_count(),
                    dims = ?grid.dims(),
                    "Cell list built."
                );
                Some(grid)
            }
            Acceleration::BruteForce => None,
        };

        Ok(Self {
            config,
            target,
            grid,
        })
    }

    pub fn evaluator(&self) -> Result<Evaluator<'_>> {
        match &self.grid {
            Some(grid) => Ok(Evaluator::new(
                &self.target,
                grid,
                self.config.evaluator,
            )?),
            None => Ok(Evaluator::brute_force(
                &self.target,
                self.config.evaluator,
            )),
        }
    }

    /// Probe with its (center) site at `position`.
    pub fn probe_at(&self, position: Point3<f64>) -> Result<ProbeState> {
        let probe = &self.config.probe;
        match probe.bond_length {
            None => Ok(ProbeState::monatomic(position, probe.charge)?),
            Some(bond_length) => {
                let state = ProbeState::diatomic_center(position, probe.charge, bond_length)?;
                Ok(match probe.anisotropy {
                    Some(anisotropy) => state.with_anisotropy(anisotropy),
                    None => state,
                })
            }
        }
    }

    pub fn query(&self) -> ScanQuery {
        let probe = &self.config.probe;
        let acceleration = self.config.acceleration;
        let anisotropic = probe.anisotropy.is_some();

        match probe.species {
            Species::He => ScanQuery::Site {
                site: 0,
                model: InteractionModel::new(
                    TermSet::new(
                        Some(DispersionSource::Peripheral),
                        probe.charge != 0.0,
                        Some(Polarization::Isotropic),
                    ),
                    acceleration,
                ),
            },
            Species::N2 => ScanQuery::Averaged {
                model: if anisotropic {
                    DiatomicModel::nitrogen_anisotropic()
                } else {
                    DiatomicModel::nitrogen()
                },
                acceleration,
            },
            Species::Co2 => ScanQuery::Averaged {
                model: if anisotropic {
                    DiatomicModel::carbon_dioxide_anisotropic()
                } else {
                    DiatomicModel::carbon_dioxide()
                },
                acceleration,
            },
        }
    }
}

pub fn point_from(values: &[f64], name: &str) -> Result<Point3<f64>> {
    match values {
        [x, y, z] => Ok(Point3::new(*x, *y, *z)),
        _ => Err(CliError::Argument(format!(
            "'{}' expects three coordinates, got {}",
            name,
            values.len()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use massccs::core::models::error::ModelError;
    use massccs::core::spatial::grid::GridError;
    use std::io::Write;
    use std::path::PathBuf;

    pub(crate) fn write_target(dir: &tempfile::TempDir) -> PathBuf {
        let path = dir.path().join("target.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "x,y,z,charge,epsilon,sigma,epsilon_central,sigma_central").unwrap();
        writeln!(file, "0.0,0.0,0.0,-0.4,0.10,3.4,0.12,3.2").unwrap();
        writeln!(file, "1.5,0.0,0.0,0.4,0.05,2.6,0.06,2.5").unwrap();
        writeln!(file, "0.0,1.4,0.3,0.0,0.08,3.0,0.08,3.0").unwrap();
        path
    }

    pub(crate) fn run_args(target: PathBuf) -> RunArgs {
        RunArgs {
            target,
            config: None,
            species: None,
            lj_cutoff: None,
            coul_cutoff: None,
            polarizability: None,
            charge: None,
            brute_force: false,
        }
    }

    #[test]
    fn point_requires_three_coordinates() {
        assert_eq!(
            point_from(&[1.0, 2.0, 3.0], "at").unwrap(),
            Point3::new(1.0, 2.0, 3.0)
        );
        assert!(matches!(
            point_from(&[1.0, 2.0], "at"),
            Err(CliError::Argument(_))
        ));
    }

    #[test]
    fn helium_session_uses_single_site_query() {
        let dir = tempfile::tempdir().unwrap();
        let session = Session::prepare(&run_args(write_target(&dir))).unwrap();

        assert!(session.grid.is_some());
        let ScanQuery::Site { site, model } = session.query() else {
            panic!("expected a single-site query");
        };
        assert_eq!(site, 0);
        assert!(!model.terms.coulomb);
        assert_eq!(model.terms.polarization, Some(Polarization::Isotropic));

        let probe = session.probe_at(Point3::new(0.0, 0.0, 5.0)).unwrap();
        assert_eq!(probe.len(), 1);
        assert_eq!(probe.bond_length(), None);
    }

    #[test]
    fn helium_probe_at_non_finite_position_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let session = Session::prepare(&run_args(write_target(&dir))).unwrap();

        assert!(matches!(
            session.probe_at(Point3::new(f64::NAN, 0.0, 5.0)),
            Err(CliError::Model(ModelError::NonFiniteSite { index: 0 }))
        ));
    }

    #[test]
    fn over_fine_grid_is_reported_instead_of_allocated() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("run.toml");
        std::fs::write(&config, "[grid]\ncell-size = 0.01\n").unwrap();
        let mut args = run_args(write_target(&dir));
        args.config = Some(config);

        assert!(matches!(
            Session::prepare(&args),
            Err(CliError::Grid(GridError::TooFine { .. }))
        ));
    }

    #[test]
    fn cell_list_and_brute_force_sessions_agree() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_target(&dir);
        let mut args = run_args(path);
        args.species = Some(Species::Co2);
        let grid_session = Session::prepare(&args).unwrap();
        args.brute_force = true;
        let brute_session = Session::prepare(&args).unwrap();
        assert!(brute_session.grid.is_none());

        let position = Point3::new(0.7, -2.1, 3.3);
        let evaluate = |session: &Session| {
            let evaluator = session.evaluator().unwrap();
            let probe = session.probe_at(position).unwrap();
            let ScanQuery::Averaged {
                model,
                acceleration,
            } = session.query()
            else {
                panic!("expected an averaged query");
            };
            massccs::engine::averaging::OrientationAverager::new(&evaluator, model, acceleration)
                .average(&probe)
                .unwrap()
        };

        let grid_result = evaluate(&grid_session);
        let brute_result = evaluate(&brute_session);
        assert!((grid_result.energy - brute_result.energy).abs() < 1e-9);
        assert!((grid_result.force - brute_result.force).norm() < 1e-9);
    }
}
