use super::{Session, point_from};
use crate::cli::EvalArgs;
use crate::error::Result;
use massccs::core::forcefield::term::ForceEnergy;
use massccs::engine::averaging::{AxisAverage, OrientationAverager};
use massccs::workflows::scan::ScanQuery;
use tracing::{info, warn};

const AXIS_NAMES: [&str; 3] = ["x", "y", "z"];

/// Outcome of a single-position query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EvalOutcome {
    Site(ForceEnergy),
    Averaged(AxisAverage),
}

impl EvalOutcome {
    pub fn total(&self) -> ForceEnergy {
        match self {
            EvalOutcome::Site(result) => *result,
            EvalOutcome::Averaged(result) => result.averaged,
        }
    }
}

pub fn evaluate(session: &Session, args: &EvalArgs) -> Result<EvalOutcome> {
    let position = point_from(&args.at, "at")?;
    let evaluator = session.evaluator()?;
    let probe = session.probe_at(position)?;

    let outcome = match session.query() {
        ScanQuery::Site { site, model } => {
            info!("Evaluating {} at {:?}", model.terms, position);
            EvalOutcome::Site(evaluator.evaluate(&probe, site, model)?)
        }
        ScanQuery::Averaged {
            model,
            acceleration,
        } => {
            info!(
                "Averaging center ({}) and sites ({}) at {:?}",
                model.center, model.sites, position
            );
            EvalOutcome::Averaged(
                OrientationAverager::new(&evaluator, model, acceleration)
                    .average_detailed(&probe)?,
            )
        }
    };
    Ok(outcome)
}

pub fn run(args: EvalArgs) -> Result<()> {
    let session = Session::prepare(&args.run)?;
    let outcome = evaluate(&session, &args)?;

    let total = outcome.total();
    println!("Energy: {:.8} kcal/mol", total.energy);
    println!(
        "Force:  [{:.8}, {:.8}, {:.8}] kcal/(mol·Å)",
        total.force.x, total.force.y, total.force.z
    );

    if args.details {
        match outcome {
            EvalOutcome::Averaged(detail) => {
                for ((name, candidate), weight) in AXIS_NAMES
                    .iter()
                    .zip(detail.candidates.iter())
                    .zip(detail.weights)
                {
                    println!(
                        "  axis {}: energy {:.8}, weight {:.6}, force [{:.8}, {:.8}, {:.8}]",
                        name,
                        candidate.energy,
                        weight,
                        candidate.force.x,
                        candidate.force.y,
                        candidate.force.z
                    );
                }
            }
            EvalOutcome::Site(_) => {
                warn!("--details only applies to diatomic probes; ignoring.");
            }
        }
    }

    Ok(())
}
