//! Orbit-weight fitting.
//!
//! Turns a point expansion into a fitness value (the moment-system residual
//! norm) and, when the placement is non-degenerate, the solved weights and
//! the system's condition number. All soft numerical failure is absorbed here
//! as a fixed penalty so the optimizer's objective is total.

use nalgebra::DVector;

use crate::math::solve_least_squares;
use crate::refine::codec::{DegenerateTrial, Expansion, FlatLayout};

/// Fitness assigned to degenerate configurations (non-finite points or a
/// rank-deficient moment system).
pub const PENALTY: f64 = 1.0;

/// Result of fitting weights to one point placement.
#[derive(Debug, Clone)]
pub enum WeightFit {
    /// The placement cannot resolve independent weights; fitness is the
    /// fixed penalty and there is no weight vector.
    Degenerate,
    Solved {
        weights: DVector<f64>,
        /// Residual norm of the moment system.
        fitness: f64,
        condition: f64,
    },
}

impl WeightFit {
    /// Scalar objective value: residual norm, or the penalty.
    pub fn fitness(&self) -> f64 {
        match self {
            WeightFit::Degenerate => PENALTY,
            WeightFit::Solved { fitness, .. } => *fitness,
        }
    }
}

/// Fit per-orbit weights by least squares against the moment system.
///
/// The expansion result is taken as `Result` so degenerate trials flow in
/// directly from the codec; they are not exceptional here.
pub fn fit_weights(
    expansion: Result<Expansion, DegenerateTrial>,
    layout: &FlatLayout,
    degree: u32,
) -> WeightFit {
    let expansion = match expansion {
        Ok(e) => e,
        Err(DegenerateTrial) => return WeightFit::Degenerate,
    };

    let (a, b) = super::assemble(&expansion, layout, degree);

    let Some(ls) = solve_least_squares(&a, &b) else {
        return WeightFit::Degenerate;
    };
    if ls.rank < a.nrows().min(a.ncols()) {
        return WeightFit::Degenerate;
    }

    WeightFit::Solved {
        weights: ls.solution,
        fitness: ls.residual,
        condition: ls.condition,
    }
}
