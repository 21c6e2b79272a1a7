//! Tensor-product Legendre bases on `[-1, 1]^2` and `[-1, 1]^3`.
//!
//! Degree-`d` block rows are all products `P_i P_j (P_k)` with total degree
//! `d`, ordered lexicographically in the first indices.

use nalgebra::DMatrix;

use crate::math::legendre_row;

pub(super) fn quad_blocks(points: &DMatrix<f64>, max_degree: u32) -> Vec<DMatrix<f64>> {
    let n = points.ncols();
    let d_max = max_degree as usize;
    let mut blocks: Vec<DMatrix<f64>> = (0..=d_max)
        .map(|d| DMatrix::zeros(d + 1, n))
        .collect();

    for j in 0..n {
        let lx = legendre_row(max_degree, points[(0, j)]);
        let ly = legendre_row(max_degree, points[(1, j)]);
        for (d, block) in blocks.iter_mut().enumerate() {
            for i in 0..=d {
                block[(i, j)] = lx[i] * ly[d - i];
            }
        }
    }
    blocks
}

pub(super) fn hex_blocks(points: &DMatrix<f64>, max_degree: u32) -> Vec<DMatrix<f64>> {
    let n = points.ncols();
    let d_max = max_degree as usize;
    let mut blocks: Vec<DMatrix<f64>> = (0..=d_max)
        .map(|d| DMatrix::zeros((d + 1) * (d + 2) / 2, n))
        .collect();

    for j in 0..n {
        let lx = legendre_row(max_degree, points[(0, j)]);
        let ly = legendre_row(max_degree, points[(1, j)]);
        let lz = legendre_row(max_degree, points[(2, j)]);
        for (d, block) in blocks.iter_mut().enumerate() {
            let mut row = 0;
            for i in 0..=d {
                for k in 0..=(d - i) {
                    block[(row, j)] = lx[i] * ly[k] * lz[d - i - k];
                    row += 1;
                }
            }
        }
    }
    blocks
}
