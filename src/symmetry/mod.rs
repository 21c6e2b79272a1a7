//! Per-domain symmetry orbit catalogues.
//!
//! Each domain module implements the pure generator for its orbit kinds: one
//! parameter tuple in, a fixed-length block of concrete points out. Point
//! order within an orbit is canonical and stable; the refinement engine
//! depends on it only through the per-kind multiplicity.
//!
//! Generators do not range-check their parameters. Out-of-range tuples on the
//! sphere produce a negative radicand and therefore NaN coordinates; the
//! codec detects the non-finite values and reports a degenerate trial, which
//! the optimizer routinely provokes and absorbs.

pub mod hexahedron;
pub mod quadrilateral;
pub mod sphere;
pub mod triangle;

use nalgebra::DMatrix;

use crate::domain::{Domain, OrbitKind};

/// Column-cursor writer over a preallocated `dim × n` point matrix.
pub struct PointWriter<'a> {
    points: &'a mut DMatrix<f64>,
    col: usize,
}

impl<'a> PointWriter<'a> {
    pub fn new(points: &'a mut DMatrix<f64>) -> Self {
        Self { points, col: 0 }
    }

    /// Number of columns written so far.
    pub fn written(&self) -> usize {
        self.col
    }

    fn push2(&mut self, x: f64, y: f64) {
        self.points[(0, self.col)] = x;
        self.points[(1, self.col)] = y;
        self.col += 1;
    }

    fn push3(&mut self, x: f64, y: f64, z: f64) {
        self.points[(0, self.col)] = x;
        self.points[(1, self.col)] = y;
        self.points[(2, self.col)] = z;
        self.col += 1;
    }
}

/// Push all sign combinations of the masked coordinates of `(x, y, z)`.
///
/// The mask is structural, fixed per orbit kind: the emitted point count must
/// never depend on parameter values, even when a trial parameter lands on
/// exactly zero.
fn signed3(out: &mut PointWriter<'_>, p: [f64; 3], mask: [bool; 3]) {
    const BOTH: &[f64] = &[1.0, -1.0];
    const PLUS: &[f64] = &[1.0];
    let sx = if mask[0] { BOTH } else { PLUS };
    let sy = if mask[1] { BOTH } else { PLUS };
    let sz = if mask[2] { BOTH } else { PLUS };
    for &fx in sx {
        for &fy in sy {
            for &fz in sz {
                out.push3(fx * p[0], fy * p[1], fz * p[2]);
            }
        }
    }
}

/// Expand one parameter tuple of `kind` into its point block.
///
/// `params` must have length `kind.arity()`; the generator writes exactly
/// `kind.multiplicity()` consecutive columns.
pub fn expand_orbit(kind: OrbitKind, params: &[f64], out: &mut PointWriter<'_>) {
    debug_assert_eq!(params.len(), kind.arity());
    match kind.domain() {
        Domain::Quadrilateral => quadrilateral::expand(kind, params, out),
        Domain::Hexahedron => hexahedron::expand(kind, params, out),
        Domain::Triangle => triangle::expand(kind, params, out),
        Domain::Sphere => sphere::expand(kind, params, out),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand_to_matrix(kind: OrbitKind, params: &[f64]) -> DMatrix<f64> {
        let dim = kind.domain().dim();
        let mut m = DMatrix::zeros(dim, kind.multiplicity());
        let mut writer = PointWriter::new(&mut m);
        expand_orbit(kind, params, &mut writer);
        assert_eq!(writer.written(), kind.multiplicity());
        m
    }

    #[test]
    fn every_kind_writes_its_multiplicity() {
        let cases: Vec<(OrbitKind, Vec<f64>)> = vec![
            (OrbitKind::Zero2, vec![]),
            (OrbitKind::SymmR0, vec![0.4]),
            (OrbitKind::SymmS, vec![0.4]),
            (OrbitKind::SymmST, vec![0.3, 0.8]),
            (OrbitKind::Zero3, vec![]),
            (OrbitKind::SymmR00, vec![0.5]),
            (OrbitKind::SymmRr0, vec![0.5]),
            (OrbitKind::SymmRrr, vec![0.5]),
            (OrbitKind::SymmRrs, vec![0.5, 0.2]),
            (OrbitKind::Centroid, vec![]),
            (OrbitKind::Vertex, vec![]),
            (OrbitKind::D3Aa, vec![0.2]),
            (OrbitKind::D3Ab, vec![0.15, 0.3]),
            (OrbitKind::A1, vec![]),
            (OrbitKind::A2, vec![]),
            (OrbitKind::A3, vec![]),
            (OrbitKind::Pq0, vec![0.6]),
            (OrbitKind::Llm, vec![0.5]),
            (OrbitKind::Rsw, vec![0.4, 0.5]),
        ];
        for (kind, params) in cases {
            let m = expand_to_matrix(kind, &params);
            assert_eq!(m.ncols(), kind.multiplicity(), "kind {}", kind.name());
        }
    }

    #[test]
    fn symm_s_t_leads_with_the_representative() {
        let m = expand_to_matrix(OrbitKind::SymmST, &[0.3, 0.8]);
        assert_eq!((m[(0, 0)], m[(1, 0)]), (0.3, 0.8));
    }

    #[test]
    fn sphere_orbits_lie_on_the_unit_sphere() {
        for (kind, params) in [
            (OrbitKind::A1, vec![]),
            (OrbitKind::A2, vec![]),
            (OrbitKind::A3, vec![]),
            (OrbitKind::Pq0, vec![0.6]),
            (OrbitKind::Llm, vec![0.5]),
            (OrbitKind::Rsw, vec![0.4, 0.5]),
        ] {
            let m = expand_to_matrix(kind, &params);
            for j in 0..m.ncols() {
                let r2 = m[(0, j)].powi(2) + m[(1, j)].powi(2) + m[(2, j)].powi(2);
                assert!((r2 - 1.0).abs() < 1e-12, "kind {} col {j}", kind.name());
            }
        }
    }

    #[test]
    fn out_of_range_llm_produces_non_finite_points() {
        // 1 - 2a^2 < 0 for a = 0.9.
        let m = expand_to_matrix(OrbitKind::Llm, &[0.9]);
        assert!(m.iter().any(|v| !v.is_finite()));
    }

    #[test]
    fn d3_aa_emits_the_barycentric_permutations_in_order() {
        // Barycentric (a, a, 1-2a) maps to Cartesian (l2, l3) on the
        // reference triangle.
        let m = expand_to_matrix(OrbitKind::D3Aa, &[0.2]);
        let points: Vec<(f64, f64)> = (0..3).map(|j| (m[(0, j)], m[(1, j)])).collect();
        assert_eq!(points, vec![(0.2, 0.6), (0.6, 0.2), (0.2, 0.2)]);
    }
}
