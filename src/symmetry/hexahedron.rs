//! Orbits of the cube `[-1, 1]^3` under the full octahedral symmetry group.

use crate::domain::OrbitKind;

use super::{PointWriter, signed3};

pub(super) fn expand(kind: OrbitKind, params: &[f64], out: &mut PointWriter<'_>) {
    match kind {
        OrbitKind::Zero3 => {
            out.push3(0.0, 0.0, 0.0);
        }
        OrbitKind::SymmR00 => {
            let a = params[0];
            signed3(out, [a, 0.0, 0.0], [true, false, false]);
            signed3(out, [0.0, a, 0.0], [false, true, false]);
            signed3(out, [0.0, 0.0, a], [false, false, true]);
        }
        OrbitKind::SymmRr0 => {
            let a = params[0];
            signed3(out, [a, a, 0.0], [true, true, false]);
            signed3(out, [a, 0.0, a], [true, false, true]);
            signed3(out, [0.0, a, a], [false, true, true]);
        }
        OrbitKind::SymmRrr => {
            let a = params[0];
            signed3(out, [a, a, a], [true, true, true]);
        }
        OrbitKind::SymmRrs => {
            let (a, b) = (params[0], params[1]);
            signed3(out, [a, a, b], [true, true, true]);
            signed3(out, [a, b, a], [true, true, true]);
            signed3(out, [b, a, a], [true, true, true]);
        }
        _ => unreachable!("not a hexahedron orbit: {}", kind.name()),
    }
}
