use crate::core::forcefield::term::ForceEnergy;
use crate::core::models::probe::ProbeState;
use crate::engine::averaging::{DiatomicModel, OrientationAverager};
use crate::engine::error::EvaluationError;
use crate::engine::evaluator::Evaluator;
use crate::engine::model::{Acceleration, InteractionModel};
use crate::engine::progress::{Progress, ProgressReporter};
use nalgebra::Point3;
use tracing::{info, instrument, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// What to compute for every probe configuration of a scan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScanQuery {
    /// Single-site query on `site` of each probe.
    Site { site: usize, model: InteractionModel },
    /// Orientation-averaged query of a diatomic probe.
    Averaged {
        model: DiatomicModel,
        acceleration: Acceleration,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScanResult {
    pub points: Vec<ForceEnergy>,
}

impl ScanResult {
    /// Index and value of the lowest-energy configuration.
    pub fn minimum(&self) -> Option<(usize, &ForceEnergy)> {
        self.points
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.energy.total_cmp(&b.energy))
    }
}

/// Evaluates every probe configuration independently.
///
/// Configurations share only the read-only target and grid, so with the
/// `parallel` feature they are distributed over the rayon thread pool.
/// Results keep the order of `probes`.
#[instrument(skip_all, name = "scan_workflow", fields(configurations = probes.len()))]
pub fn run(
    evaluator: &Evaluator,
    probes: &[ProbeState],
    query: ScanQuery,
    reporter: &ProgressReporter,
) -> Result<ScanResult, EvaluationError> {
    reporter.report(Progress::PhaseStart { name: "Scan" });

    if probes.is_empty() {
        warn!("No probe configurations to evaluate.");
        reporter.report(Progress::PhaseFinish);
        return Ok(ScanResult { points: Vec::new() });
    }

    reporter.report(Progress::TaskStart {
        total_steps: probes.len() as u64,
    });

    let evaluate_one = |probe: &ProbeState| {
        let result = match query {
            ScanQuery::Site { site, model } => evaluator.evaluate(probe, site, model),
            ScanQuery::Averaged {
                model,
                acceleration,
            } => OrientationAverager::new(evaluator, model, acceleration).average(probe),
        };
        reporter.report(Progress::TaskIncrement);
        result
    };

    #[cfg(not(feature = "parallel"))]
    let iterator = probes.iter();

    #[cfg(feature = "parallel")]
    let iterator = probes.par_iter();

    let points = iterator
        .map(evaluate_one)
        .collect::<Result<Vec<_>, _>>()?;

    reporter.report(Progress::TaskFinish);

    let in_range = points.iter().filter(|p| !p.is_zero()).count();
    info!(
        evaluated = points.len(),
        interacting = in_range,
        "Scan finished."
    );
    reporter.report(Progress::PhaseFinish);

    Ok(ScanResult { points })
}

/// `count` evenly spaced points from `start` to `end`, both included.
pub fn linear_path(start: Point3<f64>, end: Point3<f64>, count: usize) -> Vec<Point3<f64>> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            (0..count).map(|i| start + step * i as f64).collect()
        }
    }
}

/// Copies of `template` rigidly translated so that site `anchor` sits on each point of `path`.
pub fn probes_along(
    template: &ProbeState,
    anchor: usize,
    path: &[Point3<f64>],
) -> Result<Vec<ProbeState>, EvaluationError> {
    let origin = template
        .site(anchor)
        .ok_or(EvaluationError::SiteOutOfRange {
            index: anchor,
            site_count: template.len(),
        })?
        .position;

    path.iter()
        .map(|point| {
            let mut probe = template.clone();
            probe.translate(&(point - origin))?;
            Ok(probe)
        })
        .collect()
}
