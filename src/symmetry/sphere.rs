//! Orbits of the unit sphere under the full octahedral symmetry group.
//!
//! Parameterized orbits carry only the free coordinates; the dependent
//! coordinate is recovered from the unit-norm constraint. A parameter outside
//! the admissible range makes the radicand negative and the square root NaN;
//! that is the expected degenerate-trial signal, not an error here.

use crate::domain::OrbitKind;

use super::{PointWriter, signed3};

pub(super) fn expand(kind: OrbitKind, params: &[f64], out: &mut PointWriter<'_>) {
    match kind {
        OrbitKind::A1 => {
            signed3(out, [1.0, 0.0, 0.0], [true, false, false]);
            signed3(out, [0.0, 1.0, 0.0], [false, true, false]);
            signed3(out, [0.0, 0.0, 1.0], [false, false, true]);
        }
        OrbitKind::A2 => {
            let s = std::f64::consts::FRAC_1_SQRT_2;
            signed3(out, [s, s, 0.0], [true, true, false]);
            signed3(out, [s, 0.0, s], [true, false, true]);
            signed3(out, [0.0, s, s], [false, true, true]);
        }
        OrbitKind::A3 => {
            let t = 1.0 / 3.0f64.sqrt();
            signed3(out, [t, t, t], [true, true, true]);
        }
        OrbitKind::Pq0 => {
            let p = params[0];
            let q = (1.0 - p * p).sqrt();
            signed3(out, [p, q, 0.0], [true, true, false]);
            signed3(out, [q, p, 0.0], [true, true, false]);
            signed3(out, [p, 0.0, q], [true, false, true]);
            signed3(out, [q, 0.0, p], [true, false, true]);
            signed3(out, [0.0, p, q], [false, true, true]);
            signed3(out, [0.0, q, p], [false, true, true]);
        }
        OrbitKind::Llm => {
            let l = params[0];
            let m = (1.0 - 2.0 * l * l).sqrt();
            signed3(out, [l, l, m], [true, true, true]);
            signed3(out, [l, m, l], [true, true, true]);
            signed3(out, [m, l, l], [true, true, true]);
        }
        OrbitKind::Rsw => {
            let (r, s) = (params[0], params[1]);
            let w = (1.0 - r * r - s * s).sqrt();
            signed3(out, [r, s, w], [true, true, true]);
            signed3(out, [r, w, s], [true, true, true]);
            signed3(out, [s, r, w], [true, true, true]);
            signed3(out, [s, w, r], [true, true, true]);
            signed3(out, [w, r, s], [true, true, true]);
            signed3(out, [w, s, r], [true, true, true]);
        }
        _ => unreachable!("not a sphere orbit: {}", kind.name()),
    }
}
