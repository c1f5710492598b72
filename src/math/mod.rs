//! Numerical helpers.

pub mod pearson;

pub use pearson::*;
