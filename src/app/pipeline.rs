//! Shared pipeline logic behind the CLI subcommands.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! load -> validate -> refine/diagnose -> rewrite -> report
//!
//! The CLI layer then focuses on argument handling and printing.

use std::path::{Path, PathBuf};

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};
use rayon::prelude::*;

use crate::cli::{PerturbArgs, RefineArgs};
use crate::domain::Scheme;
use crate::error::AppError;
use crate::io::{read_scheme_json, write_scheme_json};
use crate::refine::{
    RefineError, RefineOptions, expand, fit_weights, flatten, optimize, rebuild_orbits, unflatten,
};
use crate::report::{CheckOutcome, RefineOutcome};

/// Refine several scheme files. Each file is an independent run, so the batch
/// is processed in parallel; results come back in input order.
pub fn refine_files(args: &RefineArgs) -> Vec<(PathBuf, Result<RefineOutcome, AppError>)> {
    let options = RefineOptions {
        max_evals: args.max_evals,
        f_tol: args.ftol,
    };
    args.files
        .par_iter()
        .map(|path| {
            let result = refine_file(path, &options, args.dry_run);
            (path.clone(), result)
        })
        .collect()
}

/// Refine one scheme file; rewrite it on success unless `dry_run`.
pub fn refine_file(
    path: &Path,
    options: &RefineOptions,
    dry_run: bool,
) -> Result<RefineOutcome, AppError> {
    let mut scheme = read_scheme_json(path)?;

    match optimize(&scheme, options) {
        Ok(refined) => {
            crate::refine::apply(&mut scheme, &refined);
            let written = !dry_run;
            if written {
                write_scheme_json(path, &scheme)?;
            }
            Ok(RefineOutcome::Improved {
                name: scheme.name.clone(),
                points: scheme.point_count(),
                before: refined.initial_fitness,
                after: refined.fitness,
                condition: refined.condition,
                evals: refined.evals,
                written,
            })
        }
        Err(RefineError::NoImprovement { before, after }) => Ok(RefineOutcome::NoImprovement {
            name: scheme.name.clone(),
            before,
            after,
        }),
        Err(RefineError::Invalid(err)) => Err(err),
    }
}

/// Diagnose one scheme file as published: stored-weight residual plus the
/// moment fit of the stored node placement.
pub fn check_file(path: &Path) -> Result<CheckOutcome, AppError> {
    let scheme = read_scheme_json(path)?;
    let (x, layout) = flatten(&scheme);
    let params = unflatten(&x, &layout);
    let expansion = expand(&params, &layout);

    let stored_residual = expansion.as_ref().ok().map(|exp| {
        let (a, b) = crate::refine::assemble(exp, &layout, scheme.degree);
        let stored: Vec<f64> = scheme
            .orbits
            .iter()
            .flat_map(|o| o.weights().iter().copied())
            .collect();
        let w = nalgebra::DVector::from_vec(stored);
        (a * w - b).norm()
    });

    let fit = fit_weights(expansion, &layout, scheme.degree);

    Ok(CheckOutcome {
        name: scheme.name.clone(),
        domain: scheme.domain,
        degree: scheme.degree,
        points: scheme.point_count(),
        stored_residual,
        fit,
    })
}

/// Jitter a scheme's free parameters with seeded Gaussian noise and write the
/// result next to the input. Weights and metadata are carried over unchanged.
pub fn perturb_file(args: &PerturbArgs) -> Result<(Scheme, PathBuf), AppError> {
    if !(args.rel.is_finite() && args.rel > 0.0) {
        return Err(AppError::malformed(format!(
            "Invalid relative jitter {}; expected a positive number.",
            args.rel
        )));
    }

    let mut scheme = read_scheme_json(&args.file)?;
    let (mut x, layout) = flatten(&scheme);

    let mut rng = StdRng::seed_from_u64(args.seed);
    for value in x.iter_mut() {
        let sigma = args.rel * value.abs();
        if let Ok(normal) = Normal::new(0.0, sigma) {
            *value += normal.sample(&mut rng);
        }
    }

    let stored: Vec<f64> = scheme
        .orbits
        .iter()
        .flat_map(|o| o.weights().iter().copied())
        .collect();
    let weights = nalgebra::DVector::from_vec(stored);
    scheme.orbits = rebuild_orbits(&x, &layout, &weights);

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| args.file.with_extension("perturbed.json"));
    write_scheme_json(&output, &scheme)?;
    Ok((scheme, output))
}
