//! Load-time normalization of raw source fields.
//!
//! - period descriptors → canonical first-of-month dates (`period`)
//! - raw metric strings → optional numbers (`numeric`)

pub mod numeric;
pub mod period;

pub use numeric::*;
pub use period::*;
