//! Real spherical-harmonic basis on the unit sphere.
//!
//! Harmonics are computed complex (`P̄_l^m(cos θ) e^{imφ}`, Condon-Shortley
//! phase folded into the normalized associated Legendre recurrence) and
//! combined with their negative-`m` partners into the real basis before
//! leaving this module. The combinations must cancel to real values; a
//! non-negligible imaginary residue means the recurrence and the fold
//! disagree, which is an internal-consistency failure, not a data condition.
//!
//! Degree-`l` block rows: `m = 0`, then the cosine/sine pair for each
//! `m = 1..=l`, `2l + 1` rows in total.

use nalgebra::DMatrix;
use num_complex::Complex64;

/// Imaginary residue above this magnitude (relative to the folded value) is a
/// fatal internal-consistency error. Tied to double precision.
pub const IM_NEGLIGIBLE: f64 = 1e-15;

/// `1 / (2 sqrt(pi))`, the constant harmonic.
const Y00: f64 = 0.28209479177387814;

/// Fold a complex combination to its real value, asserting the cancellation.
fn fold_real(z: Complex64) -> f64 {
    assert!(
        z.im.abs() <= IM_NEGLIGIBLE.max(IM_NEGLIGIBLE * z.re.abs()),
        "spherical-harmonic fold left an imaginary residue: {}",
        z.im
    );
    z.re
}

pub(super) fn blocks(points: &DMatrix<f64>, max_degree: u32) -> Vec<DMatrix<f64>> {
    let n = points.ncols();
    let l_max = max_degree as usize;
    let mut blocks: Vec<DMatrix<f64>> = (0..=l_max)
        .map(|l| DMatrix::zeros(2 * l + 1, n))
        .collect();

    let sqrt2 = std::f64::consts::SQRT_2;

    for j in 0..n {
        let x = points[(0, j)];
        let y = points[(1, j)];
        let z = points[(2, j)];
        let sin_theta = x.hypot(y);
        let cos_theta = z;
        let phi = y.atan2(x);

        // Normalized associated Legendre table pbar[l][m], 0 <= m <= l, with
        // the 1/sqrt(4 pi) factor and Condon-Shortley phase baked in.
        let mut pbar: Vec<Vec<f64>> = Vec::with_capacity(l_max + 1);
        pbar.push(vec![Y00]);
        for l in 1..=l_max {
            let lf = l as f64;
            let mut row = vec![0.0; l + 1];
            row[l] = -((2.0 * lf + 1.0) / (2.0 * lf)).sqrt() * sin_theta * pbar[l - 1][l - 1];
            row[l - 1] = (2.0 * lf + 1.0).sqrt() * cos_theta * pbar[l - 1][l - 1];
            for m in 0..l.saturating_sub(1) {
                let mf = m as f64;
                let a = ((4.0 * lf * lf - 1.0) / (lf * lf - mf * mf)).sqrt();
                let b = (((lf - 1.0) * (lf - 1.0) - mf * mf)
                    / (4.0 * (lf - 1.0) * (lf - 1.0) - 1.0))
                    .sqrt();
                row[m] = a * (cos_theta * pbar[l - 1][m] - b * pbar[l - 2][m]);
            }
            pbar.push(row);
        }

        for (l, block) in blocks.iter_mut().enumerate() {
            // m = 0: already real, but keep the complex path so the fold
            // assertion covers it too.
            block[(0, j)] = fold_real(Complex64::new(pbar[l][0], 0.0));
            for m in 1..=l {
                let y_lm = pbar[l][m] * Complex64::from_polar(1.0, m as f64 * phi);
                // Y_{l,-m} = (-1)^m conj(Y_{l,m}).
                let parity = if m % 2 == 0 { 1.0 } else { -1.0 };
                let y_lnm = parity * y_lm.conj();
                let cos_part = (parity * y_lm + y_lnm) / sqrt2;
                let sin_part = (parity * y_lm - y_lnm) / (Complex64::i() * sqrt2);
                block[(2 * m - 1, j)] = fold_real(cos_part);
                block[(2 * m, j)] = fold_real(sin_part);
            }
        }
    }
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval_at(p: [f64; 3], l_max: u32) -> Vec<DMatrix<f64>> {
        let pts = DMatrix::from_column_slice(3, 1, &p);
        blocks(&pts, l_max)
    }

    #[test]
    fn constant_harmonic_value() {
        let b = eval_at([0.6, 0.48, 0.64], 0);
        assert!((b[0][(0, 0)] - Y00).abs() < 1e-15);
    }

    #[test]
    fn degree_one_closed_forms() {
        let p = [0.6, 0.48, 0.64];
        let b = eval_at(p, 1);
        let c = (3.0 / (4.0 * std::f64::consts::PI)).sqrt();
        // Row order: Y_10 ~ z, then the (cos, sin) pair ~ (x, y).
        assert!((b[1][(0, 0)] - c * p[2]).abs() < 1e-13);
        assert!((b[1][(1, 0)] - c * p[0]).abs() < 1e-13);
        assert!((b[1][(2, 0)] - c * p[1]).abs() < 1e-13);
    }

    #[test]
    fn addition_theorem_row_sums() {
        // Sum over m of |Y_lm|^2 equals (2l + 1) / (4 pi) on the sphere.
        let p = [0.36, 0.48, 0.8];
        let b = eval_at(p, 5);
        for (l, block) in b.iter().enumerate() {
            let sum: f64 = (0..block.nrows()).map(|r| block[(r, 0)].powi(2)).sum();
            let expected = (2.0 * l as f64 + 1.0) / (4.0 * std::f64::consts::PI);
            assert!(
                (sum - expected).abs() < 1e-12,
                "l = {l}: {sum} vs {expected}"
            );
        }
    }

    #[test]
    fn poles_are_handled() {
        let b = eval_at([0.0, 0.0, 1.0], 4);
        for block in &b {
            assert!(block.iter().all(|v| v.is_finite()));
        }
    }
}
