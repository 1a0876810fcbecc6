//! Gauss-Legendre quadrature along straight segments of the complex plane.
//!
//! Nodes and weights are computed once on `[0, 1]` by Newton iteration on the
//! Legendre polynomial of the requested degree, then mapped affinely onto any
//! segment `[a, b]` with complex endpoints. An `n`-point rule integrates
//! polynomials of degree up to `2 n - 1` exactly, so the default 64-point rule
//! is exact (to round-off) for products of B-splines of any practical order,
//! and accurate for smooth weight functions.
//!
//! ```
//! use num_complex::Complex64 as C64;
//! use ecspline::quad::GaussLegendre;
//!
//! let gl = GaussLegendre::default();
//! let a = C64::from(0.0);
//! let b = C64::new(1.0, 1.0);
//! // ∫ z² dz along the straight line from 0 to 1 + i
//! let res = gl.integrate(a, b, |z| z * z);
//! assert!((res - b.powi(3) / 3.0).norm() < 1e-12);
//! ```

use std::f64::consts::PI;
use ndarray as nd;
use num_complex::Complex64 as C64;
use crate::{
    utils::KahanSum,
    DEF_MAXITERS,
    NGAUSS,
    NOD_THRESHOLD,
};

const NEWTON_EPSILON: f64 = 2e-15;

// evaluate the Legendre polynomials P_n(z) and P_{n - 1}(z) via the upward
// three-term recurrence
fn legendre_pair(n: usize, z: f64) -> (f64, f64) {
    let mut p1: f64 = 1.0;
    let mut p2: f64 = 0.0;
    let mut p3: f64;
    for j in 1..=n {
        let j = j as f64;
        p3 = p2;
        p2 = p1;
        p1 = ((2.0 * j - 1.0) * z * p2 - (j - 1.0) * p3) / j;
    }
    (p1, p2)
}

/// Fixed-size Gauss-Legendre rule on `[0, 1]`.
#[derive(Clone, Debug)]
pub struct GaussLegendre {
    points: nd::Array1<f64>,
    weights: nd::Array1<f64>,
}

impl Default for GaussLegendre {
    fn default() -> Self { Self::new(NGAUSS) }
}

impl GaussLegendre {
    /// Compute an `n`-point rule.
    ///
    /// *Panics if `n` is zero*.
    pub fn new(n: usize) -> Self {
        assert!(n > 0, "quad::GaussLegendre::new: need at least one point");
        let mut points: nd::Array1<f64> = nd::Array1::zeros(n);
        let mut weights: nd::Array1<f64> = nd::Array1::zeros(n);
        let nf = n as f64;
        for i in 1..=(n + 1) / 2 {
            let mut z: f64 = (PI * (i as f64 - 0.25) / (nf + 0.5)).cos();
            let mut z1: f64;
            let mut pp: f64;
            let mut k: usize = 0;
            loop {
                let (p1, p2) = legendre_pair(n, z);
                pp = nf * (z * p1 - p2) / (z * z - 1.0);
                z1 = z;
                z = z1 - p1 / pp;
                k += 1;
                if (z - z1).abs() <= NEWTON_EPSILON { break; }
                if k >= DEF_MAXITERS {
                    log::warn!(
                        "quad::GaussLegendre::new: root {} of P_{} did not \
                        converge within {} iterations",
                        i, n, DEF_MAXITERS,
                    );
                    break;
                }
            }
            let w = ((1.0 - z * z) * pp * pp).recip();
            points[i - 1] = (1.0 - z) / 2.0;
            points[n - i] = (1.0 + z) / 2.0;
            weights[i - 1] = w;
            weights[n - i] = w;
        }
        Self { points, weights }
    }

    /// Number of quadrature points.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize { self.points.len() }

    /// Get a reference to the nodes on `[0, 1]`, in increasing order.
    pub fn get_points(&self) -> &nd::Array1<f64> { &self.points }

    /// Get a reference to the weights, which sum to 1.
    pub fn get_weights(&self) -> &nd::Array1<f64> { &self.weights }

    /// Integrate `f` along the straight segment from `a` to `b`.
    ///
    /// Segments shorter than the node threshold (`1e-15`) contribute exactly
    /// zero. Contributions from individual nodes are accumulated with
    /// compensated summation.
    pub fn integrate<F>(&self, a: C64, b: C64, f: F) -> C64
    where F: Fn(C64) -> C64
    {
        let width = b - a;
        if width.norm() < NOD_THRESHOLD { return C64::from(0.0); }
        let sum: KahanSum<C64>
            = self.points.iter().zip(&self.weights)
            .map(|(xk, wk)| f(a + width * *xk) * *wk)
            .collect();
        sum.total() * width
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::E;
    use approx::{ assert_abs_diff_eq, assert_relative_eq };

    #[test]
    fn rule_is_symmetric_and_normalized() {
        let gl = GaussLegendre::default();
        assert_eq!(gl.len(), NGAUSS);
        let x = gl.get_points();
        let w = gl.get_weights();
        assert!(x.iter().zip(x.iter().skip(1)).all(|(a, b)| a < b));
        assert!(x.iter().all(|xk| *xk > 0.0 && *xk < 1.0));
        for k in 0..NGAUSS {
            assert_abs_diff_eq!(x[k] + x[NGAUSS - 1 - k], 1.0, epsilon = 1e-14);
            assert_relative_eq!(w[k], w[NGAUSS - 1 - k], max_relative = 1e-12);
        }
        assert_abs_diff_eq!(w.sum(), 1.0, epsilon = 1e-13);
    }

    #[test]
    fn constant_on_unit_interval() {
        let gl = GaussLegendre::default();
        let res = gl.integrate(C64::from(0.0), C64::from(1.0), |_| C64::from(1.0));
        assert_abs_diff_eq!(res.re, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(res.im, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn polynomials_are_exact() {
        let gl = GaussLegendre::new(3);
        // degree 5 = 2 * 3 - 1
        let res = gl.integrate(C64::from(0.0), C64::from(2.0), |z| z.powi(5));
        assert_relative_eq!(res.re, 64.0 / 6.0, max_relative = 1e-13);
    }

    #[test]
    fn odd_rule_has_midpoint() {
        let gl = GaussLegendre::new(5);
        assert_abs_diff_eq!(gl.get_points()[2], 0.5, epsilon = 1e-15);
        assert_abs_diff_eq!(gl.get_weights().sum(), 1.0, epsilon = 1e-14);
    }

    #[test]
    fn smooth_function() {
        let gl = GaussLegendre::default();
        let res = gl.integrate(C64::from(0.0), C64::from(1.0), |z| z.exp());
        assert_relative_eq!(res.re, E - 1.0, max_relative = 1e-13);
    }

    #[test]
    fn complex_segment() {
        let gl = GaussLegendre::default();
        let b = C64::new(1.0, 1.0);
        let res = gl.integrate(C64::from(0.0), b, |z| z * z);
        let exact = b.powi(3) / 3.0;
        assert_abs_diff_eq!(res.re, exact.re, epsilon = 1e-13);
        assert_abs_diff_eq!(res.im, exact.im, epsilon = 1e-13);
    }

    #[test]
    fn degenerate_segment_is_zero() {
        let gl = GaussLegendre::default();
        let a = C64::new(1.0, 0.5);
        let res = gl.integrate(a, a + 1e-16, |_| C64::from(1e20));
        assert_eq!(res, C64::from(0.0));
    }
}
