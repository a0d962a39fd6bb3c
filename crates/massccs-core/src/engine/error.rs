use thiserror::Error;

use crate::core::models::error::ModelError;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum EngineError {
    #[error("Grid indexes {grid_atoms} atoms but the target has {target_atoms}")]
    GridMismatch {
        grid_atoms: usize,
        target_atoms: usize,
    },

    #[error(
        "Grid shells (first = {first_radius}, second = {second_radius}) do not cover the cutoffs (lj = {lj_cutoff}, coulomb = {coul_cutoff})"
    )]
    GridTooSmall {
        first_radius: f64,
        second_radius: f64,
        lj_cutoff: f64,
        coul_cutoff: f64,
    },
}

#[derive(Debug, Error, PartialEq, Clone)]
pub enum EvaluationError {
    #[error("Probe site {index} is out of range for a probe with {site_count} sites")]
    SiteOutOfRange { index: usize, site_count: usize },

    #[error("Cell-list acceleration requested but the evaluator has no spatial grid")]
    GridUnavailable,

    #[error("Diatomic averaging requires a probe with a bond length")]
    MissingBondLength,

    #[error("Anisotropic polarization requires a probe with a well-defined molecular axis")]
    DegenerateOrientation,

    #[error("Invalid probe: {0}")]
    InvalidProbe(#[from] ModelError),
}
