//! Command-line parsing for the quadrature scheme refiner.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the numerical code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "qref",
    version,
    about = "Symmetric quadrature scheme refinement (moment fitting)"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Refine scheme files in place: re-optimize node parameters, re-solve
    /// weights, and print a before/after residual comparison.
    Refine(RefineArgs),
    /// Print residual and conditioning diagnostics without modifying files.
    Check(CheckArgs),
    /// Jitter a scheme's free parameters (fixture generation for refinement
    /// experiments).
    Perturb(PerturbArgs),
}

/// Options for refining scheme files.
#[derive(Debug, Parser, Clone)]
pub struct RefineArgs {
    /// Scheme JSON files to refine.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Maximum number of objective evaluations per scheme.
    #[arg(long, default_value_t = 4000)]
    pub max_evals: usize,

    /// Simplex convergence tolerance on the objective spread.
    #[arg(long, default_value_t = 1e-15)]
    pub ftol: f64,

    /// Run the search and report, but do not rewrite any file.
    #[arg(long)]
    pub dry_run: bool,
}

/// Options for checking scheme files.
#[derive(Debug, Parser)]
pub struct CheckArgs {
    /// Scheme JSON files to check.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

/// Options for perturbing a scheme file.
#[derive(Debug, Parser)]
pub struct PerturbArgs {
    /// Scheme JSON file to perturb.
    pub file: PathBuf,

    /// Relative jitter magnitude per parameter.
    #[arg(long, default_value_t = 0.1)]
    pub rel: f64,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Output path (defaults to `<file stem>.perturbed.json`).
    #[arg(long)]
    pub output: Option<PathBuf>,
}
