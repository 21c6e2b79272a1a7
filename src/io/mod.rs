//! Input/output helpers.
//!
//! - scheme JSON read/write (`scheme`)

pub mod scheme;

pub use scheme::*;
