use crate::error::{CliError, Result};
use massccs::core::models::target::{LennardJones, TargetAtom, TargetModel};
use nalgebra::Point3;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// One row of the target table.
#[derive(Debug, Deserialize)]
struct TargetRecord {
    x: f64,
    y: f64,
    z: f64,
    charge: f64,
    epsilon: f64,
    sigma: f64,
    #[serde(default)]
    epsilon_central: Option<f64>,
    #[serde(default)]
    sigma_central: Option<f64>,
}

impl TargetRecord {
    fn into_atom(self) -> TargetAtom {
        let lj = LennardJones::new(self.epsilon, self.sigma);
        let central = LennardJones::new(
            self.epsilon_central.unwrap_or(self.epsilon),
            self.sigma_central.unwrap_or(self.sigma),
        );
        TargetAtom::new(Point3::new(self.x, self.y, self.z), self.charge, lj).with_central(central)
    }
}

/// Reads a target molecule from a CSV table with the header
/// `x,y,z,charge,epsilon,sigma[,epsilon_central,sigma_central]`.
///
/// Missing central parameters fall back to the peripheral ones.
pub fn load_target(path: &Path) -> Result<TargetModel> {
    let parse_error = |source: csv::Error| CliError::FileParsing {
        path: path.to_path_buf(),
        source: source.into(),
    };

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_path(path)
        .map_err(parse_error)?;

    let mut atoms = Vec::new();
    for record in reader.deserialize::<TargetRecord>() {
        atoms.push(record.map_err(parse_error)?.into_atom());
    }
    debug!("Parsed {} atom records from '{}'.", atoms.len(), path.display());

    let target = TargetModel::new(atoms)?;
    info!(
        atoms = target.len(),
        total_charge = target.total_charge(),
        "Target molecule loaded."
    );
    Ok(target)
}
