//! Orbits of the square `[-1, 1]^2` under the full D4 symmetry group.

use crate::domain::OrbitKind;

use super::PointWriter;

pub(super) fn expand(kind: OrbitKind, params: &[f64], out: &mut PointWriter<'_>) {
    match kind {
        OrbitKind::Zero2 => {
            out.push2(0.0, 0.0);
        }
        OrbitKind::SymmR0 => {
            let a = params[0];
            out.push2(a, 0.0);
            out.push2(-a, 0.0);
            out.push2(0.0, a);
            out.push2(0.0, -a);
        }
        OrbitKind::SymmS => {
            let a = params[0];
            out.push2(a, a);
            out.push2(a, -a);
            out.push2(-a, a);
            out.push2(-a, -a);
        }
        OrbitKind::SymmST => {
            let (a, b) = (params[0], params[1]);
            out.push2(a, b);
            out.push2(a, -b);
            out.push2(-a, b);
            out.push2(-a, -b);
            out.push2(b, a);
            out.push2(b, -a);
            out.push2(-b, a);
            out.push2(-b, -a);
        }
        _ => unreachable!("not a quadrilateral orbit: {}", kind.name()),
    }
}
