//! `quadrefine` library crate.
//!
//! The binary (`qref`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - modules are reusable (e.g., batch tooling over a scheme corpus)
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod basis;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
pub mod refine;
pub mod report;
pub mod symmetry;
