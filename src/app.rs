//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - runs the refinement/check/perturb pipelines
//! - prints reports
//! - maps failures to exit codes

use clap::Parser;

use crate::cli::{CheckArgs, Command, PerturbArgs, RefineArgs};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `qref` binary.
pub fn run() -> Result<(), AppError> {
    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Refine(args) => handle_refine(args),
        Command::Check(args) => handle_check(args),
        Command::Perturb(args) => handle_perturb(args),
    }
}

fn handle_refine(args: RefineArgs) -> Result<(), AppError> {
    let outcomes = pipeline::refine_files(&args);

    // Print every per-file result in input order; a clean "no improvement"
    // is a success, structural failures decide the exit code.
    let mut first_err: Option<AppError> = None;
    for (path, result) in outcomes {
        match result {
            Ok(outcome) => {
                print!("{}", crate::report::format_refine_outcome(&path, &outcome));
            }
            Err(err) => {
                if first_err.is_none() {
                    first_err = Some(err);
                } else {
                    eprintln!("{err}");
                }
            }
        }
    }
    match first_err {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

fn handle_check(args: CheckArgs) -> Result<(), AppError> {
    for path in &args.files {
        let outcome = pipeline::check_file(path)?;
        print!("{}", crate::report::format_check_outcome(path, &outcome));
    }
    Ok(())
}

fn handle_perturb(args: PerturbArgs) -> Result<(), AppError> {
    let (scheme, output) = pipeline::perturb_file(&args)?;
    print!(
        "{}",
        crate::report::format_perturb(&scheme, &output, args.rel, args.seed)
    );
    Ok(())
}
