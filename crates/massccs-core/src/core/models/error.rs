use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ModelError {
    #[error("Target molecule must contain at least one atom")]
    EmptyTarget,

    #[error("Target atom {index} has a non-finite position or charge")]
    NonFiniteAtom { index: usize },

    #[error("Target atom {index} has invalid dispersion parameters (epsilon = {epsilon}, sigma = {sigma})")]
    InvalidDispersion {
        index: usize,
        epsilon: f64,
        sigma: f64,
    },

    #[error("Probe must contain at least one site")]
    EmptyProbe,

    #[error("Probe site {index} has a non-finite position or charge")]
    NonFiniteSite { index: usize },

    #[error("Probe site {index} is out of range for a probe with {site_count} site(s)")]
    SiteOutOfRange { index: usize, site_count: usize },

    #[error("Bond length must be positive and finite, got {0}")]
    InvalidBondLength(f64),

    #[error("Polarizability components must be non-negative and finite (axial = {axial}, radial = {radial})")]
    InvalidPolarizability { axial: f64, radial: f64 },

    #[error("Orientation axis sites ({first}, {second}) are invalid for a probe with {site_count} site(s)")]
    InvalidAxis {
        first: usize,
        second: usize,
        site_count: usize,
    },
}
