//! Compact form <-> flat parameter vector <-> expanded point set.
//!
//! The flat vector is what the optimizer moves through; the expanded point
//! set is what the basis evaluator consumes. Both conversions are driven by a
//! `FlatLayout` built once per scheme: an explicit, ordered record of every
//! orbit's kind, tuple count, and slice of the flat vector. Threading the
//! layout through every stage keeps the column-ordering contract between
//! codec, assembler, and reassembler in one place instead of relying on
//! matching iteration order.

use nalgebra::{DMatrix, DVector};

use crate::domain::{Domain, OrbitKind, Scheme};
use crate::symmetry::{PointWriter, expand_orbit};

/// One orbit's slot in the flat parameter vector.
#[derive(Debug, Clone)]
pub struct FlatEntry {
    pub kind: OrbitKind,
    /// Number of parameter tuples (columns), fixed by the scheme's original
    /// declaration and never recomputed during refinement.
    pub tuples: usize,
    /// Start offset of this orbit's parameters in the flat vector.
    pub offset: usize,
}

impl FlatEntry {
    /// Flat-vector length of this orbit's parameter block.
    pub fn len(&self) -> usize {
        self.kind.arity() * self.tuples
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Ordered layout of a scheme's free parameters.
#[derive(Debug, Clone)]
pub struct FlatLayout {
    pub domain: Domain,
    pub entries: Vec<FlatEntry>,
    /// Total flat-vector length.
    pub len: usize,
}

impl FlatLayout {
    pub fn of(scheme: &Scheme) -> Self {
        let mut entries = Vec::with_capacity(scheme.orbits.len());
        let mut offset = 0;
        for orbit in &scheme.orbits {
            let entry = FlatEntry {
                kind: orbit.kind,
                tuples: orbit.tuples(),
                offset,
            };
            offset += entry.len();
            entries.push(entry);
        }
        Self {
            domain: scheme.domain,
            entries,
            len: offset,
        }
    }

    /// Total number of expanded points.
    pub fn point_count(&self) -> usize {
        self.entries
            .iter()
            .map(|e| e.kind.multiplicity() * e.tuples)
            .sum()
    }

    /// Total number of distinct weights (aggregated columns).
    pub fn weight_count(&self) -> usize {
        self.entries.iter().map(|e| e.tuples).sum()
    }
}

/// Strip the weight rows and concatenate all parameter rows into one vector.
///
/// Exactly inverted by [`unflatten`]: per orbit, parameter rows are laid out
/// row-major (first parameter row across all tuples, then the second).
pub fn flatten(scheme: &Scheme) -> (DVector<f64>, FlatLayout) {
    let layout = FlatLayout::of(scheme);
    let mut x = DVector::zeros(layout.len);
    for (orbit, entry) in scheme.orbits.iter().zip(&layout.entries) {
        let mut at = entry.offset;
        for row in orbit.params() {
            for &value in row {
                x[at] = value;
                at += 1;
            }
        }
    }
    (x, layout)
}

/// Rebuild the per-orbit parameter matrices (`arity x tuples`) from a flat
/// vector.
pub fn unflatten(x: &DVector<f64>, layout: &FlatLayout) -> Vec<DMatrix<f64>> {
    debug_assert_eq!(x.len(), layout.len);
    layout
        .entries
        .iter()
        .map(|entry| {
            let arity = entry.kind.arity();
            let mut m = DMatrix::zeros(arity, entry.tuples);
            let mut at = entry.offset;
            for r in 0..arity {
                for c in 0..entry.tuples {
                    m[(r, c)] = x[at];
                    at += 1;
                }
            }
            m
        })
        .collect()
}

/// Expanded point set, with the per-orbit point-block length alongside.
#[derive(Debug, Clone, PartialEq)]
pub struct Expansion {
    /// `dim x n` point matrix; columns ordered orbit -> tuple -> canonical
    /// group order.
    pub points: DMatrix<f64>,
    /// Points per tuple for each orbit, in layout order. A pure function of
    /// the orbit kind (its multiplicity).
    pub orbit_lengths: Vec<usize>,
}

/// A trial parameter vector produced a non-finite point.
///
/// This is an expected outcome, not an error: the optimizer routinely
/// proposes parameters outside an orbit's admissible range. Callers convert
/// it into a fixed penalty fitness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DegenerateTrial;

/// Expand per-orbit parameter matrices into concrete points.
pub fn expand(
    params: &[DMatrix<f64>],
    layout: &FlatLayout,
) -> Result<Expansion, DegenerateTrial> {
    debug_assert_eq!(params.len(), layout.entries.len());
    let dim = layout.domain.dim();
    let total = layout.point_count();
    let mut points = DMatrix::zeros(dim, total);

    {
        let mut writer = PointWriter::new(&mut points);
        for (entry, p) in layout.entries.iter().zip(params) {
            for c in 0..entry.tuples {
                let tuple: Vec<f64> = p.column(c).iter().copied().collect();
                expand_orbit(entry.kind, &tuple, &mut writer);
            }
        }
        assert_eq!(
            writer.written(),
            total,
            "orbit generators wrote {} of {} points",
            writer.written(),
            total
        );
    }

    if points.iter().any(|v| !v.is_finite()) {
        return Err(DegenerateTrial);
    }

    let orbit_lengths = layout
        .entries
        .iter()
        .map(|e| e.kind.multiplicity())
        .collect();

    Ok(Expansion {
        points,
        orbit_lengths,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{OrbitData, OrbitKind};

    fn scheme(domain: Domain, orbits: Vec<OrbitData>) -> Scheme {
        Scheme {
            name: "fixture".to_string(),
            domain,
            degree: 3,
            source: None,
            comments: Vec::new(),
            test_tolerance: 1e-14,
            orbits,
        }
    }

    fn fixtures() -> Vec<Scheme> {
        vec![
            scheme(
                Domain::Quadrilateral,
                vec![
                    OrbitData {
                        kind: OrbitKind::Zero2,
                        data: vec![vec![8.0 / 7.0]],
                    },
                    OrbitData {
                        kind: OrbitKind::SymmST,
                        data: vec![vec![5.0 / 14.0], vec![0.846], vec![0.466]],
                    },
                ],
            ),
            scheme(
                Domain::Hexahedron,
                vec![OrbitData {
                    kind: OrbitKind::SymmR00,
                    data: vec![vec![4.0 / 3.0], vec![1.0]],
                }],
            ),
            scheme(
                Domain::Triangle,
                vec![
                    OrbitData {
                        kind: OrbitKind::Centroid,
                        data: vec![vec![-0.28125]],
                    },
                    OrbitData {
                        kind: OrbitKind::D3Aa,
                        data: vec![vec![25.0 / 96.0], vec![0.2]],
                    },
                ],
            ),
            scheme(
                Domain::Sphere,
                vec![
                    OrbitData {
                        kind: OrbitKind::A1,
                        data: vec![vec![2.0943951023931953]],
                    },
                    OrbitData {
                        kind: OrbitKind::Llm,
                        data: vec![vec![0.9], vec![0.3015113445777636]],
                    },
                ],
            ),
        ]
    }

    #[test]
    fn flatten_unflatten_round_trips_every_domain() {
        for scheme in fixtures() {
            let (x, layout) = flatten(&scheme);
            let params = unflatten(&x, &layout);
            assert_eq!(params.len(), scheme.orbits.len());
            for (orbit, p) in scheme.orbits.iter().zip(&params) {
                assert_eq!(p.nrows(), orbit.kind.arity());
                assert_eq!(p.ncols(), orbit.tuples());
                for (r, row) in orbit.params().iter().enumerate() {
                    for (c, &value) in row.iter().enumerate() {
                        assert_eq!(p[(r, c)], value);
                    }
                }
            }
        }
    }

    #[test]
    fn expansion_point_count_matches_multiplicity_sum() {
        for scheme in fixtures() {
            let (x, layout) = flatten(&scheme);
            let params = unflatten(&x, &layout);
            let expansion = expand(&params, &layout).unwrap();
            assert_eq!(expansion.points.ncols(), scheme.point_count());
            assert_eq!(
                expansion.orbit_lengths,
                scheme
                    .orbits
                    .iter()
                    .map(|o| o.kind.multiplicity())
                    .collect::<Vec<_>>()
            );
        }
    }

    #[test]
    fn multi_tuple_orbit_round_trips() {
        let s = scheme(
            Domain::Quadrilateral,
            vec![OrbitData {
                kind: OrbitKind::SymmST,
                data: vec![
                    vec![0.1, 0.2],
                    vec![0.3, 0.4],
                    vec![0.5, 0.6],
                ],
            }],
        );
        let (x, layout) = flatten(&s);
        assert_eq!(x.as_slice(), &[0.3, 0.4, 0.5, 0.6]);
        let params = unflatten(&x, &layout);
        assert_eq!(params[0][(0, 1)], 0.4);
        assert_eq!(params[0][(1, 0)], 0.5);
        let expansion = expand(&params, &layout).unwrap();
        assert_eq!(expansion.points.ncols(), 16);
    }

    #[test]
    fn out_of_range_sphere_parameter_is_a_degenerate_trial() {
        let s = scheme(
            Domain::Sphere,
            vec![OrbitData {
                kind: OrbitKind::Llm,
                data: vec![vec![1.0], vec![0.9]],
            }],
        );
        let (x, layout) = flatten(&s);
        let params = unflatten(&x, &layout);
        assert_eq!(expand(&params, &layout), Err(DegenerateTrial));
    }
}
