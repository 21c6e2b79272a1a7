//! Per-domain orthogonal polynomial basis evaluators.
//!
//! Every evaluator produces a degree-graded sequence of value blocks: one
//! matrix per degree `0..=D`, rows = that degree's basis functions, columns =
//! points. The bases are orthogonal with respect to the unweighted integral
//! over the domain, so every basis function except the constant integrates to
//! zero; the constant's exact integral is the single domain-specific moment
//! the weight solver needs.

pub mod cube;
pub mod sphere;
pub mod triangle;

use nalgebra::DMatrix;

use crate::domain::Domain;

/// Evaluate the basis blocks for degrees `0..=max_degree` at `points`
/// (`dim × n`, column per point).
pub fn eval_blocks(domain: Domain, points: &DMatrix<f64>, max_degree: u32) -> Vec<DMatrix<f64>> {
    match domain {
        Domain::Quadrilateral => cube::quad_blocks(points, max_degree),
        Domain::Hexahedron => cube::hex_blocks(points, max_degree),
        Domain::Triangle => triangle::blocks(points, max_degree),
        Domain::Sphere => sphere::blocks(points, max_degree),
    }
}

/// Exact integral of the constant (degree-0) basis function over the domain,
/// under the evaluator's normalization.
pub fn constant_integral(domain: Domain) -> f64 {
    match domain {
        // The constant function is 1 on the cube domains.
        Domain::Quadrilateral => 4.0,
        Domain::Hexahedron => 8.0,
        Domain::Triangle => 0.5,
        // The constant harmonic is 1/(2 sqrt(pi)); its integral over the unit
        // sphere surface is 4 pi / (2 sqrt(pi)).
        Domain::Sphere => 2.0 * std::f64::consts::PI.sqrt(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_shapes_match_the_graded_counts() {
        let pts2 = DMatrix::from_column_slice(2, 3, &[0.1, 0.2, -0.4, 0.5, 0.3, -0.2]);
        let pts3 = DMatrix::from_column_slice(3, 2, &[0.1, 0.2, 0.3, -0.4, 0.5, 0.1]);

        let quad = eval_blocks(Domain::Quadrilateral, &pts2, 4);
        for (d, block) in quad.iter().enumerate() {
            assert_eq!(block.nrows(), d + 1);
            assert_eq!(block.ncols(), 3);
        }

        let hex = eval_blocks(Domain::Hexahedron, &pts3, 4);
        for (d, block) in hex.iter().enumerate() {
            assert_eq!(block.nrows(), (d + 1) * (d + 2) / 2);
            assert_eq!(block.ncols(), 2);
        }

        let tri = eval_blocks(Domain::Triangle, &pts2, 4);
        for (d, block) in tri.iter().enumerate() {
            assert_eq!(block.nrows(), d + 1);
        }

        let unit = DMatrix::from_column_slice(3, 1, &[0.6, 0.48, 0.64]);
        let sph = eval_blocks(Domain::Sphere, &unit, 4);
        for (d, block) in sph.iter().enumerate() {
            assert_eq!(block.nrows(), 2 * d + 1);
        }
    }

    #[test]
    fn degree_zero_block_is_the_constant() {
        let pts = DMatrix::from_column_slice(2, 2, &[0.3, -0.7, 0.0, 0.5]);
        let quad = eval_blocks(Domain::Quadrilateral, &pts, 0);
        assert_eq!(quad.len(), 1);
        assert!((quad[0][(0, 0)] - 1.0).abs() < 1e-15);
        assert!((quad[0][(0, 1)] - 1.0).abs() < 1e-15);
    }
}
