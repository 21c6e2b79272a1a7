//! PKD (Proriol-Koornwinder-Dubiner) orthogonal basis on the reference
//! triangle with vertices `(0,0)`, `(1,0)`, `(0,1)`.
//!
//! The classical construction collapses the triangle to a square and divides
//! by `1 - y`, which blows up at the top vertex. We evaluate the equivalent
//! polynomial form instead: with
//!
//! `q_k(x, y) = (1 - y)^k P_k((2x + y - 1) / (1 - y))`
//!
//! the Legendre recurrence multiplies through to
//!
//! `k q_k = (2k - 1)(2x + y - 1) q_{k-1} - (k - 1)(1 - y)^2 q_{k-2}`
//!
//! which is division-free and valid on the whole closed triangle (vertex
//! orbits do place points at `y = 1`). The full basis is
//! `phi_{k,l} = q_k * P_l^{(2k+1,0)}(2y - 1)` with total degree `k + l`.

use nalgebra::DMatrix;

use crate::math::jacobi_row;

pub(super) fn blocks(points: &DMatrix<f64>, max_degree: u32) -> Vec<DMatrix<f64>> {
    let n = points.ncols();
    let d_max = max_degree as usize;
    let mut blocks: Vec<DMatrix<f64>> = (0..=d_max)
        .map(|d| DMatrix::zeros(d + 1, n))
        .collect();

    for j in 0..n {
        let x = points[(0, j)];
        let y = points[(1, j)];

        // q_k by the division-free collapsed recurrence.
        let u = 2.0 * x + y - 1.0;
        let v2 = (1.0 - y) * (1.0 - y);
        let mut q = Vec::with_capacity(d_max + 1);
        q.push(1.0);
        if d_max >= 1 {
            q.push(u);
        }
        for k in 2..=d_max {
            let kf = k as f64;
            let next = ((2.0 * kf - 1.0) * u * q[k - 1] - (kf - 1.0) * v2 * q[k - 2]) / kf;
            q.push(next);
        }

        let t = 2.0 * y - 1.0;
        for k in 0..=d_max {
            let jac = jacobi_row((d_max - k) as u32, 2.0 * k as f64 + 1.0, t);
            for (l, jac_l) in jac.iter().enumerate() {
                // phi_{k,l} lands in the degree-(k+l) block, rows ordered by
                // ascending k.
                blocks[k + l][(k, j)] = q[k] * jac_l;
            }
        }
    }
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval_at(x: f64, y: f64, max_degree: u32) -> Vec<DMatrix<f64>> {
        let pts = DMatrix::from_column_slice(2, 1, &[x, y]);
        blocks(&pts, max_degree)
    }

    #[test]
    fn low_degree_closed_forms() {
        let (x, y) = (0.2, 0.3);
        let b = eval_at(x, y, 2);
        // phi_00 = 1
        assert!((b[0][(0, 0)] - 1.0).abs() < 1e-15);
        // phi_01 = P1^{(1,0)}(2y - 1) = 3y - 1
        assert!((b[1][(0, 0)] - (3.0 * y - 1.0)).abs() < 1e-14);
        // phi_10 = q_1 = 2x + y - 1
        assert!((b[1][(1, 0)] - (2.0 * x + y - 1.0)).abs() < 1e-14);
    }

    #[test]
    fn finite_at_the_singular_vertex() {
        // The collapsed coordinate is singular at (0, 1); the polynomial
        // recurrence must not be.
        let b = eval_at(0.0, 1.0, 6);
        for block in &b {
            assert!(block.iter().all(|v| v.is_finite()));
        }
    }

    #[test]
    fn non_constant_functions_integrate_to_zero() {
        // Midpoint rule over the (u, v) square mapped by
        // (x, y) = (u(1-v), uv), Jacobian u.
        let m = 400usize;
        let h = 1.0 / m as f64;
        let mut integrals = [0.0f64; 3]; // phi_01, phi_10, phi_11
        for a in 0..m {
            for b in 0..m {
                let u = (a as f64 + 0.5) * h;
                let v = (b as f64 + 0.5) * h;
                let (x, y) = (u * (1.0 - v), u * v);
                let vals = eval_at(x, y, 2);
                let w = u * h * h;
                integrals[0] += w * vals[1][(0, 0)];
                integrals[1] += w * vals[1][(1, 0)];
                integrals[2] += w * vals[2][(1, 0)];
            }
        }
        for (i, integral) in integrals.iter().enumerate() {
            assert!(integral.abs() < 1e-4, "integral {i} = {integral}");
        }
    }
}
