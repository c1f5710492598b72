//! Input/output helpers.
//!
//! - CSV ingest + normalization (`ingest`)
//! - series exports (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
