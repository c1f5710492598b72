//! `econ-series` library crate.
//!
//! The binary (`econ`) is a thin wrapper around this library so that:
//!
//! - the normalization and statistics core is testable without spawning processes
//! - the query service can sit behind other front-ends (HTTP, notebooks, etc.)

pub mod analysis;
pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
pub mod normalize;
pub mod report;
