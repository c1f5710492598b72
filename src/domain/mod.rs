//! Domain types used throughout the crate.
//!
//! This module defines:
//!
//! - the indicator catalog (`Indicator`, `IndicatorSpec`)
//! - period encodings and filters (`PeriodMode`, `TagFilter`)
//! - the normalized in-memory table (`DatasetTable`, `Row`)

pub mod catalog;
pub mod table;
pub mod types;

pub use catalog::*;
pub use table::*;
pub use types::*;
