//! Moment-system assembly.
//!
//! Builds the rectangular system `A w ≈ b` for a given point expansion:
//! basis values of every degree `0..=D` at every point, re-aggregated so that
//! all points sharing one weight (same orbit, same parameter tuple) sum into
//! a single column. The right-hand side is zero except for the constant basis
//! function's known exact integral, because every other basis function is
//! orthogonal to the constant.

use nalgebra::{DMatrix, DVector};

use crate::basis;
use crate::refine::codec::{Expansion, FlatLayout};

/// Assemble the aggregated moment matrix `A` (basis functions x weights) and
/// the moment vector `b`.
///
/// Tuple counts come from the layout (the scheme's original declarations);
/// `orbit_lengths` comes from the expansion. Their product must account for
/// every expanded point, and a mismatch means the codec and the symmetry
/// catalogue disagree.
pub fn assemble(
    expansion: &Expansion,
    layout: &FlatLayout,
    degree: u32,
) -> (DMatrix<f64>, DVector<f64>) {
    let n_points = expansion.points.ncols();
    let expected: usize = expansion
        .orbit_lengths
        .iter()
        .zip(&layout.entries)
        .map(|(len, entry)| len * entry.tuples)
        .sum();
    assert_eq!(
        expected, n_points,
        "expansion produced {n_points} points but the layout accounts for {expected}"
    );

    let blocks = basis::eval_blocks(layout.domain, &expansion.points, degree);
    let n_rows: usize = blocks.iter().map(DMatrix::nrows).sum();
    let n_weights = layout.weight_count();

    let mut a = DMatrix::zeros(n_rows, n_weights);
    let mut row0 = 0;
    for block in &blocks {
        let mut col = 0;
        let mut point = 0;
        for (len, entry) in expansion.orbit_lengths.iter().zip(&layout.entries) {
            for _ in 0..entry.tuples {
                for r in 0..block.nrows() {
                    let mut sum = 0.0;
                    for p in point..point + len {
                        sum += block[(r, p)];
                    }
                    a[(row0 + r, col)] = sum;
                }
                point += len;
                col += 1;
            }
        }
        row0 += block.nrows();
    }

    let mut b = DVector::zeros(n_rows);
    b[0] = basis::constant_integral(layout.domain);

    (a, b)
}
