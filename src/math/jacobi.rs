//! Classical orthogonal polynomial recurrences.
//!
//! The basis evaluators are built from two families:
//!
//! - Legendre `P_n(x)`, orthogonal on `[-1, 1]` with weight 1
//! - Jacobi `P_n^{(α,0)}(x)`, orthogonal on `[-1, 1]` with weight `(1-x)^α`
//!
//! Both are evaluated by their three-term recurrences, which are stable on the
//! whole interval and need no special-casing at the endpoints.

/// Evaluate `P_0(x) ..= P_n(x)` (Legendre).
pub fn legendre_row(n: u32, x: f64) -> Vec<f64> {
    let n = n as usize;
    let mut out = Vec::with_capacity(n + 1);
    out.push(1.0);
    if n == 0 {
        return out;
    }
    out.push(x);
    for k in 2..=n {
        let kf = k as f64;
        let next = ((2.0 * kf - 1.0) * x * out[k - 1] - (kf - 1.0) * out[k - 2]) / kf;
        out.push(next);
    }
    out
}

/// Evaluate `P_0^{(α,0)}(x) ..= P_n^{(α,0)}(x)` (Jacobi, β = 0).
pub fn jacobi_row(n: u32, alpha: f64, x: f64) -> Vec<f64> {
    let n = n as usize;
    let mut out = Vec::with_capacity(n + 1);
    out.push(1.0);
    if n == 0 {
        return out;
    }
    out.push(((alpha + 2.0) * x + alpha) / 2.0);
    for k in 2..=n {
        let kf = k as f64;
        // Three-term recurrence for β = 0:
        //   a1 P_k = a2(x) P_{k-1} - a3 P_{k-2}
        let a1 = 2.0 * kf * (kf + alpha) * (2.0 * kf + alpha - 2.0);
        let a2 = (2.0 * kf + alpha - 1.0)
            * ((2.0 * kf + alpha) * (2.0 * kf + alpha - 2.0) * x + alpha * alpha);
        let a3 = 2.0 * (kf + alpha - 1.0) * (kf - 1.0) * (2.0 * kf + alpha);
        let next = (a2 * out[k - 1] - a3 * out[k - 2]) / a1;
        out.push(next);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legendre_known_values() {
        let row = legendre_row(4, 0.5);
        assert!((row[0] - 1.0).abs() < 1e-15);
        assert!((row[1] - 0.5).abs() < 1e-15);
        // P2(x) = (3x^2 - 1)/2
        assert!((row[2] + 0.125).abs() < 1e-15);
        // P4(0.5) = -37/128
        assert!((row[4] + 37.0 / 128.0).abs() < 1e-14);
    }

    #[test]
    fn jacobi_reduces_to_legendre_for_alpha_zero() {
        for &x in &[-0.9, -0.3, 0.0, 0.4, 1.0] {
            let leg = legendre_row(6, x);
            let jac = jacobi_row(6, 0.0, x);
            for (a, b) in leg.iter().zip(jac.iter()) {
                assert!((a - b).abs() < 1e-13, "mismatch at x={x}: {a} vs {b}");
            }
        }
    }

    #[test]
    fn jacobi_value_at_one_is_binomial() {
        // P_n^{(α,0)}(1) = C(n + α, n)
        let row = jacobi_row(3, 2.0, 1.0);
        assert!((row[1] - 3.0).abs() < 1e-14);
        assert!((row[2] - 6.0).abs() < 1e-13);
        assert!((row[3] - 10.0).abs() < 1e-13);
    }
}
