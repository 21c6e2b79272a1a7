//! Nonlinear refinement driver.
//!
//! Wraps the weight solver's fitness as a total objective over the flat
//! parameter vector and runs a Nelder-Mead search from the published
//! parameters. Acceptance is decided by the measured residual alone: the
//! minimizer's own convergence flag is ignored, because an incomplete search
//! may still have landed on a strictly better placement, and a "converged"
//! search may not have moved at all.

use nalgebra::DVector;

use crate::domain::Scheme;
use crate::error::AppError;
use crate::math::{MinimizeOptions, nelder_mead};
use crate::refine::codec::{expand, flatten, unflatten};
use crate::refine::reassemble::rebuild_orbits;
use crate::refine::solve::{WeightFit, fit_weights};

/// Options for one refinement run.
#[derive(Debug, Clone)]
pub struct RefineOptions {
    /// Maximum number of objective evaluations.
    pub max_evals: usize,
    /// Simplex function-value spread tolerance.
    pub f_tol: f64,
}

impl Default for RefineOptions {
    fn default() -> Self {
        Self {
            max_evals: 4000,
            f_tol: 1e-15,
        }
    }
}

/// A successful refinement.
#[derive(Debug, Clone)]
pub struct Refined {
    /// Updated compact orbit data (solved weights + optimized parameters).
    pub orbits: Vec<crate::domain::OrbitData>,
    /// Fitness of the published scheme, measured before the search.
    pub initial_fitness: f64,
    /// Fitness of the refined scheme.
    pub fitness: f64,
    /// Condition number of the final moment system.
    pub condition: f64,
    /// Objective evaluations spent by the search.
    pub evals: usize,
}

/// Refinement failure.
#[derive(Debug, Clone)]
pub enum RefineError {
    /// Structurally invalid scheme (library-level report of what the CLI
    /// would reject before writing anything).
    Invalid(AppError),
    /// The search found no placement with a strictly smaller residual. An
    /// expected outcome for well-optimized published schemes.
    NoImprovement { before: f64, after: f64 },
}

impl std::fmt::Display for RefineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RefineError::Invalid(err) => write!(f, "{err}"),
            RefineError::NoImprovement { before, after } => write!(
                f,
                "no improvement: residual {after:.6e} does not beat {before:.6e}"
            ),
        }
    }
}

impl std::error::Error for RefineError {}

/// Refine a scheme's free orbit parameters in place (logically; the input is
/// not mutated) and return the improved compact data.
///
/// The orbit structure (kinds, tuple counts) is fixed; only node parameters
/// move and weights are re-solved. Fails with
/// [`RefineError::NoImprovement`] unless the final measured residual is
/// strictly below the published baseline.
pub fn optimize(scheme: &Scheme, options: &RefineOptions) -> Result<Refined, RefineError> {
    scheme.validate().map_err(RefineError::Invalid)?;

    let (x0, layout) = flatten(scheme);
    let degree = scheme.degree;

    let objective = |x: &DVector<f64>| {
        let params = unflatten(x, &layout);
        fit_weights(expand(&params, &layout), &layout, degree).fitness()
    };

    let before = objective(&x0);

    let minimize_options = MinimizeOptions {
        max_evals: options.max_evals,
        f_tol: options.f_tol,
    };
    let result = nelder_mead(objective, &x0, &minimize_options);
    let after = result.fun;

    if !(after < before) {
        return Err(RefineError::NoImprovement { before, after });
    }

    // One more solve at the accepted point for the final weights and the
    // condition number. The accepted residual is strictly below the penalty,
    // so the placement cannot be degenerate.
    let params = unflatten(&result.x, &layout);
    let fit = fit_weights(expand(&params, &layout), &layout, degree);
    let WeightFit::Solved {
        weights,
        fitness,
        condition,
    } = fit
    else {
        unreachable!("accepted placement re-solved as degenerate");
    };

    Ok(Refined {
        orbits: rebuild_orbits(&result.x, &layout, &weights),
        initial_fitness: before,
        fitness,
        condition,
        evals: result.evals,
    })
}
