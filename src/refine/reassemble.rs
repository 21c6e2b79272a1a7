//! Merge refined parameters and solved weights back into compact form.

use nalgebra::DVector;

use crate::domain::{OrbitData, Scheme};
use crate::refine::codec::{FlatLayout, unflatten};
use crate::refine::refiner::Refined;

/// Comment appended to refined schemes. Matched verbatim for idempotence.
pub const REFINED_COMMENT: &str = "precision improved with qref";

/// Rebuild each orbit's compact data matrix: the solved weight row first,
/// then the optimized parameter rows, mirroring the layout the flattening
/// stripped.
pub fn rebuild_orbits(
    x: &DVector<f64>,
    layout: &FlatLayout,
    weights: &DVector<f64>,
) -> Vec<OrbitData> {
    debug_assert_eq!(weights.len(), layout.weight_count());
    let params = unflatten(x, layout);

    let mut out = Vec::with_capacity(layout.entries.len());
    let mut w_at = 0;
    for (entry, p) in layout.entries.iter().zip(&params) {
        let mut data = Vec::with_capacity(1 + entry.kind.arity());
        // The weight row broadcasts over the orbit's tuple columns.
        data.push((w_at..w_at + entry.tuples).map(|i| weights[i]).collect());
        w_at += entry.tuples;
        for r in 0..entry.kind.arity() {
            data.push((0..entry.tuples).map(|c| p[(r, c)]).collect());
        }
        out.push(OrbitData {
            kind: entry.kind,
            data,
        });
    }
    out
}

/// Apply a refinement to a scheme in place.
///
/// Replaces the orbit data, records the measured residual as the new test
/// tolerance, and appends the refinement comment (once; reruns do not
/// duplicate it). Bibliographic metadata is left untouched.
pub fn apply(scheme: &mut Scheme, refined: &Refined) {
    scheme.orbits = refined.orbits.clone();
    scheme.test_tolerance = refined.fitness;
    if !scheme.comments.iter().any(|c| c == REFINED_COMMENT) {
        scheme.comments.push(REFINED_COMMENT.to_string());
    }
}
