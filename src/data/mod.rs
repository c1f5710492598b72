//! In-memory indicator data.

pub mod store;

pub use store::*;
