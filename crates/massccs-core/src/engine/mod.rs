//! # Engine Module
//!
//! Composes the force-field kernels into complete probe queries.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Cutoffs, polarizability and constants, validated by a builder
//! - **Interaction Models** ([`model`]) - Which terms a probe site carries and how candidate
//!   atoms are enumerated
//! - **Evaluation** ([`evaluator`]) - Sums the selected terms over brute-force or cell-list
//!   candidates for one probe site
//! - **Orientation Averaging** ([`averaging`]) - Boltzmann average over the three axis
//!   placements of a linear diatomic probe
//! - **Progress Monitoring** ([`progress`]) - Callback-based reporting for long batch runs
//! - **Error Handling** ([`error`]) - Construction and per-query error types
//!
//! ## Key Capabilities
//!
//! - **Composable terms** replacing one function per combination of dispersion,
//!   Coulomb and induced-dipole contributions
//! - **Equivalent acceleration modes**: cell-list and brute-force queries return the
//!   same force and energy up to floating-point summation order
//! - **Read-only sharing** of the target, grid and configuration across threads

pub mod averaging;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod model;
pub mod progress;
