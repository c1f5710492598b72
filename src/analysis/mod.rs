//! Per-request computations over the loaded tables.
//!
//! - trailing-window and date-range filters (`window`)
//! - descriptive statistics (`stats`)
//! - cross-indicator correlation (`correlation`)
//! - derived series (`transform`)

pub mod correlation;
pub mod stats;
pub mod transform;
pub mod window;

pub use correlation::*;
pub use stats::*;
pub use transform::*;
pub use window::*;
