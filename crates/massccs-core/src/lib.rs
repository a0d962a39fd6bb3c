//! # MassCCS Core Library
//!
//! Force and potential-energy evaluation of a gas probe (He, N2, CO2) moving
//! near a fixed target molecule, the inner loop of trajectory-method collision
//! cross-section calculations.
//!
//! ## Architectural Philosophy
//!
//! The library keeps a strict three-layer split so that the physics can be
//! tested without any driver attached.
//!
//! - **[`core`]: The Foundation.** Immutable target and probe models, the
//!   cell-list spatial index, and pure pair kernels for dispersion,
//!   electrostatics and induced-dipole polarization.
//!
//! - **[`engine`]: The Logic Core.** The `Evaluator`, which sums composable
//!   interaction terms over candidate target atoms, and the
//!   `OrientationAverager`, which Boltzmann-averages the three axis placements
//!   of a linear diatomic probe.
//!
//! - **[`workflows`]: The Public API.** Batch queries over many probe
//!   configurations, run in parallel over the shared read-only target.
//!
//! A trajectory integrator owns the probe state and calls into the engine once
//! per step; every query is a pure function of the probe state, so concurrent
//! trajectories can share one evaluator.

pub mod core;
pub mod engine;
pub mod workflows;
