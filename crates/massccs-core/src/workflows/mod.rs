//! # Workflows Module
//!
//! Batch entry points built on the engine.
//!
//! - **Scan Workflow** ([`scan`]) - Evaluates a list of probe configurations, either
//!   per site or orientation-averaged, with progress reporting and optional
//!   parallelism over configurations.

pub mod scan;
