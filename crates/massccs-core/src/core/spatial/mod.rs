//! # Spatial Index Module
//!
//! Cell-list decomposition of the target molecule used to find candidate
//! target atoms around a probe position without scanning the whole molecule.
//!
//! The grid is built once per target. Each cell knows the atoms it holds and
//! two precomputed lists of neighboring cells: a first shell sized for the
//! dispersion cutoff and a second shell that extends the reach to the
//! electrostatic cutoff. Positions outside the indexed volume map to no cell,
//! which the evaluator reports as a non-interacting probe.

pub mod grid;
