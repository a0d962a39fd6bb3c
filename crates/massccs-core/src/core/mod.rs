//! # Core Module
//!
//! Stateless building blocks for gas–target interaction queries.
//!
//! ## Architecture
//!
//! - **Molecular Representation** ([`models`]) - The fixed target molecule and the
//!   mutable gas probe state, with validation at construction time
//! - **Energy Calculations** ([`forcefield`]) - Physical constants, cutoff-shifted pair
//!   kernels and the induced-dipole energy/force from an accumulated electric field
//! - **Neighbor Search** ([`spatial`]) - The cell-list grid that enumerates candidate
//!   target atoms in two shells around a probe position
//!
//! ## Units
//!
//! Distances are in Angstroms, energies in kcal/mol, charges in elementary charge
//! units and forces in kcal/(mol·Å). Polarizabilities handed to the kernels are
//! already multiplied by the Coulomb constant.

pub mod forcefield;
pub mod models;
pub mod spatial;
