//! Rank-aware least squares solver.
//!
//! The refinement engine repeatedly solves rectangular moment-fitting systems
//! `A w ≈ b` where `A` is tall (basis functions × orbit weights). Besides the
//! solution we need the numerical rank (to detect geometrically degenerate
//! point placements) and the condition number (reported to the user), so we
//! solve via SVD and read everything off one decomposition.

use nalgebra::{DMatrix, DVector};

/// Least-squares solution of `A w ≈ b` with rank/conditioning diagnostics.
#[derive(Debug, Clone)]
pub struct LeastSquares {
    pub solution: DVector<f64>,
    pub rank: usize,
    pub condition: f64,
    /// Residual 2-norm `‖A w - b‖`.
    pub residual: f64,
}

/// Solve a least squares problem using SVD.
///
/// The rank tolerance follows the usual `eps * max(m, n) * σ_max` rule.
/// Returns `None` if the decomposition cannot produce a finite solution;
/// callers treat that the same way as a rank-deficient system.
pub fn solve_least_squares(a: &DMatrix<f64>, b: &DVector<f64>) -> Option<LeastSquares> {
    let svd = a.clone().svd(true, true);

    let sigma_max = svd.singular_values.max();
    if !sigma_max.is_finite() {
        return None;
    }
    let tol = f64::EPSILON * a.nrows().max(a.ncols()) as f64 * sigma_max;
    let rank = svd.rank(tol);

    let solution = svd.solve(b, tol).ok()?;
    if solution.iter().any(|v| !v.is_finite()) {
        return None;
    }

    let sigma_min = svd.singular_values.min();
    let condition = if sigma_min > 0.0 {
        sigma_max / sigma_min
    } else {
        f64::INFINITY
    };
    let residual = (a * &solution - b).norm();

    Some(LeastSquares {
        solution,
        rank,
        condition,
        residual,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn least_squares_solves_simple_system() {
        // Fit y = 2 + 3x on x = [0,1,2]
        let a = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0]);
        let b = DVector::from_row_slice(&[2.0, 5.0, 8.0]);

        let ls = solve_least_squares(&a, &b).unwrap();
        assert_eq!(ls.rank, 2);
        assert!((ls.solution[0] - 2.0).abs() < 1e-10);
        assert!((ls.solution[1] - 3.0).abs() < 1e-10);
        assert!(ls.residual < 1e-10);
    }

    #[test]
    fn least_squares_reports_rank_deficiency() {
        // Second column is a multiple of the first.
        let a = DMatrix::from_row_slice(3, 2, &[1.0, 4.0, 0.0, 0.0, 0.0, 0.0]);
        let b = DVector::from_row_slice(&[4.0, 0.0, 0.0]);

        let ls = solve_least_squares(&a, &b).unwrap();
        assert_eq!(ls.rank, 1);
        assert!(ls.condition.is_infinite());
    }

    #[test]
    fn overdetermined_residual_is_reported() {
        // Inconsistent system: no exact solution.
        let a = DMatrix::from_row_slice(3, 1, &[1.0, 1.0, 1.0]);
        let b = DVector::from_row_slice(&[0.0, 1.0, 2.0]);

        let ls = solve_least_squares(&a, &b).unwrap();
        assert!((ls.solution[0] - 1.0).abs() < 1e-12);
        assert!((ls.residual - 2.0f64.sqrt()).abs() < 1e-12);
    }
}
