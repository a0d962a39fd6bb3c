//! # Core Models Module
//!
//! Data models for the two participants of an interaction query.
//!
//! - [`target`] - The fixed molecule: positions, partial charges and two sets of
//!   Lennard-Jones parameters per atom (generic and central backbone site)
//! - [`probe`] - The gas probe: one or more charged sites, an optional bond length
//!   for diatomics and an optional axial/radial polarizability
//! - [`error`] - Validation failures raised while constructing either model
//!
//! ```ignore
//! use massccs::core::models::target::{LennardJones, TargetAtom, TargetModel};
//! use massccs::core::models::probe::ProbeState;
//!
//! let target = TargetModel::new(vec![TargetAtom::new(
//!     Point3::origin(),
//!     -0.4,
//!     LennardJones::new(0.1, 3.4),
//! )])?;
//! let probe = ProbeState::diatomic_center(Point3::new(0.0, 0.0, 6.0), 0.965, 1.0976)?;
//! ```

pub mod error;
pub mod probe;
pub mod target;
