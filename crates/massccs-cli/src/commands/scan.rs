use super::{Session, point_from};
use crate::cli::ScanArgs;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use massccs::core::forcefield::term::ForceEnergy;
use massccs::engine::progress::ProgressReporter;
use massccs::workflows::scan::{self, ScanResult};
use nalgebra::Point3;
use serde::Serialize;
use std::io::Write;
use tracing::info;

#[derive(Debug, Serialize)]
struct ProfileRow {
    index: usize,
    x: f64,
    y: f64,
    z: f64,
    energy: f64,
    fx: f64,
    fy: f64,
    fz: f64,
}

impl ProfileRow {
    fn new(index: usize, position: &Point3<f64>, result: &ForceEnergy) -> Self {
        Self {
            index,
            x: position.x,
            y: position.y,
            z: position.z,
            energy: result.energy,
            fx: result.force.x,
            fy: result.force.y,
            fz: result.force.z,
        }
    }
}

pub fn profile(
    session: &Session,
    args: &ScanArgs,
    reporter: &ProgressReporter,
) -> Result<(Vec<Point3<f64>>, ScanResult)> {
    let start = point_from(&args.from, "from")?;
    let end = point_from(&args.to, "to")?;
    if args.points == 0 {
        return Err(CliError::Argument(
            "A scan needs at least one point".into(),
        ));
    }

    let path = scan::linear_path(start, end, args.points);
    let template = session.probe_at(start)?;
    let probes = scan::probes_along(&template, 0, &path)?;

    let evaluator = session.evaluator()?;
    let result = scan::run(&evaluator, &probes, session.query(), reporter)?;
    Ok((path, result))
}

fn write_profile<W: Write>(writer: W, path: &[Point3<f64>], result: &ScanResult) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for (index, (position, point)) in path.iter().zip(&result.points).enumerate() {
        csv_writer
            .serialize(ProfileRow::new(index, position, point))
            .map_err(|e| CliError::Other(e.into()))?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn run(args: ScanArgs) -> Result<()> {
    let session = Session::prepare(&args.run)?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!("Invoking the scan workflow over {} positions...", args.points);
    let (path, result) = profile(&session, &args, &reporter)?;

    match &args.output {
        Some(output) => {
            write_profile(std::fs::File::create(output)?, &path, &result)?;
            println!("Profile written to: {}", output.display());
        }
        None => write_profile(std::io::stdout().lock(), &path, &result)?,
    }

    if let Some((index, minimum)) = result.minimum() {
        let position = path[index];
        info!(
            index,
            energy = minimum.energy,
            "Lowest energy at ({:.3}, {:.3}, {:.3}).",
            position.x,
            position.y,
            position.z
        );
        if args.output.is_some() {
            println!(
                "Minimum energy {:.6} kcal/mol at point {}",
                minimum.energy, index
            );
        }
    }

    Ok(())
}
