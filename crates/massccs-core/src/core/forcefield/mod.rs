//! # Force Field Module
//!
//! Pairwise interaction kernels between a probe site and one target atom.
//!
//! ## Overview
//!
//! Every term is truncated at its own cutoff and shifted so that energy
//! vanishes there:
//!
//! - **Dispersion/repulsion** as a 12-6 Lennard-Jones potential minus its value at
//!   the cutoff
//! - **Electrostatics** as a Coulomb potential smoothed so that both energy and
//!   force reach zero at the cutoff
//! - **Induced-dipole polarization** from the electric field and field-gradient
//!   tensor accumulated over all target charges, with a scalar or a rotated
//!   axial/radial polarizability tensor
//!
//! ## Key Components
//!
//! - [`constants`] - Coulomb and Boltzmann constants and the averaging temperature
//! - [`potentials`] - Shifted pair kernels and the smoothed field contribution
//! - [`polarization`] - Field accumulation and the induced-dipole energy and force
//! - [`term`] - The `ForceEnergy` accumulator returned by every query

pub mod constants;
pub mod polarization;
pub mod potentials;
pub mod term;
