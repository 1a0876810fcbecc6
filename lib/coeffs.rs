//! Piecewise-monomial coefficients of every B-spline.
//!
//! Rather than evaluating the Cox-de Boor recursion at every point, the
//! recursion is carried out once on polynomial coefficients. On each knot
//! interval `[t[j], t[j + 1]]` a B-spline of order *k* is a polynomial of
//! degree *k* - 1 in the local coordinate
//! ```text
//! r = (x - t[j]) / (t[j + 1] - t[j]) ∊ [0, 1]
//! ```
//! and the two-term recursion
//! ```text
//!              x - t[i]                     t[i + k] - x
//! B[i, k] = ---------------- B[i, k - 1] + ------------------ B[i + 1, k - 1]
//!           t[i + k - 1] - t[i]            t[i + k] - t[i + 1]
//! ```
//! becomes an affine reparameterization of each parent's coefficients, since
//! the prefactors are themselves linear in *r* on every interval. Spans whose
//! magnitude falls below the node threshold (repeated knots) contribute
//! nothing.

use std::ops::{ Index, IndexMut };
use ndarray as nd;
use num_complex::Complex64 as C64;
use crate::{ knots::KnotVector, NOD_THRESHOLD };

/// Coefficients of a single B-spline of order *k*, indexed by `(interval,
/// degree)` with both running over `0..k`.
///
/// Entry `(j, d)` multiplies `r^d` on the `j`-th knot interval of the
/// B-spline's support.
#[derive(Clone, Debug, PartialEq)]
pub struct CoefficientTable {
    c: nd::Array2<C64>,
}

impl CoefficientTable {
    /// Create an all-zero table for order `order`.
    pub fn zeros(order: usize) -> Self {
        Self { c: nd::Array2::zeros((order, order)) }
    }

    /// Order of the B-spline described by this table.
    pub fn order(&self) -> usize { self.c.nrows() }

    /// Get the coefficients of all degrees on a single interval.
    ///
    /// *Panics if `interval` is out of range*.
    pub fn interval(&self, interval: usize) -> nd::ArrayView1<'_, C64> {
        self.c.row(interval)
    }

    fn clear(&mut self) { self.c.fill(C64::from(0.0)); }
}

impl Index<(usize, usize)> for CoefficientTable {
    type Output = C64;

    fn index(&self, idx: (usize, usize)) -> &Self::Output {
        &self.c[[idx.0, idx.1]]
    }
}

impl IndexMut<(usize, usize)> for CoefficientTable {
    fn index_mut(&mut self, idx: (usize, usize)) -> &mut Self::Output {
        &mut self.c[[idx.0, idx.1]]
    }
}

/// Scratch storage holding the intermediate tables of every order for the
/// B-splines supported on a single window of `order + 1` knots.
///
/// Order *k* has `order - k + 1` such sub-splines. Storage is allocated once
/// and reused for every window.
#[derive(Clone, Debug)]
pub struct CoeffArena {
    order: usize,
    tables: Vec<CoefficientTable>,
}

impl CoeffArena {
    /// Allocate storage for final order `order`.
    pub fn new(order: usize) -> Self {
        let tables = vec![CoefficientTable::zeros(order); order * order];
        Self { order, tables }
    }

    fn idx(&self, k: usize, tbs: usize) -> usize { (k - 1) * self.order + tbs }

    /// Compute the table of the B-spline supported on `window`, which must
    /// hold exactly `order + 1` knots.
    ///
    /// *Panics if `window` has the wrong length*.
    pub fn build(&mut self, window: nd::ArrayView1<C64>) -> CoefficientTable {
        assert_eq!(window.len(), self.order + 1);
        self.tables.iter_mut().for_each(CoefficientTable::clear);
        for tbs in 0..self.order {
            let i = self.idx(1, tbs);
            self.tables[i][(0, 0)] = C64::from(1.0);
        }
        for k in 2..=self.order {
            for tbs in 0..self.order - k + 1 {
                self.propagate(&window, tbs, k);
            }
        }
        self.tables[self.idx(self.order, 0)].clone()
    }

    // combine the order-(k - 1) tables at `tbs` and `tbs + 1` into the order-k
    // table at `tbs`
    fn propagate(&mut self, w: &nd::ArrayView1<C64>, tbs: usize, k: usize) {
        let split = self.idx(k, 0);
        let lo = self.idx(k - 1, tbs);
        let (lower, upper) = self.tables.split_at_mut(split);
        let bs = &mut upper[tbs];

        let span = w[tbs + k - 1] - w[tbs];
        if span.norm() > NOD_THRESHOLD {
            let left = &lower[lo];
            for interval in 0..k - 1 {
                let a = (w[tbs + interval] - w[tbs]) / span;
                for d in 0..k - 1 {
                    bs[(interval, d)] += left[(interval, d)] * a;
                }
                let a = (w[tbs + interval + 1] - w[tbs + interval]) / span;
                for d in 0..k - 1 {
                    bs[(interval, d + 1)] += left[(interval, d)] * a;
                }
            }
        }

        let span = w[tbs + k] - w[tbs + 1];
        if span.norm() > NOD_THRESHOLD {
            let right = &lower[lo + 1];
            for interval in 0..k - 1 {
                let a = (w[tbs + k] - w[tbs + interval + 1]) / span;
                for d in 0..k - 1 {
                    bs[(interval + 1, d)] += right[(interval, d)] * a;
                }
                let a = -(w[tbs + interval + 2] - w[tbs + interval + 1]) / span;
                for d in 0..k - 1 {
                    bs[(interval + 1, d + 1)] += right[(interval, d)] * a;
                }
            }
        }
    }
}

/// Compute the coefficient table of every B-spline defined by `knots`.
pub fn build_tables(knots: &KnotVector) -> Vec<CoefficientTable> {
    let order = knots.order();
    let nbs = knots.len() - order;
    let mut arena = CoeffArena::new(order);
    let tables: Vec<CoefficientTable>
        = (0..nbs).map(|bs| arena.build(knots.window(bs))).collect();
    log::debug!(
        "coeffs::build_tables: built {} tables of order {}", nbs, order);
    tables
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use crate::ecs::Contour;

    fn uniform_knots(n: usize, order: usize) -> KnotVector {
        let grid: nd::Array1<f64> = (0..n).map(|i| i as f64).collect();
        KnotVector::new(&grid, &Contour::identity(), order)
    }

    fn check(table: &CoefficientTable, expected: &[&[f64]]) {
        for (j, row) in expected.iter().enumerate() {
            for (d, val) in row.iter().enumerate() {
                assert_abs_diff_eq!(table[(j, d)].re, *val, epsilon = 1e-14);
                assert_abs_diff_eq!(table[(j, d)].im, 0.0, epsilon = 1e-14);
            }
        }
    }

    #[test]
    fn order_one_is_constant() {
        let tables = build_tables(&uniform_knots(4, 1));
        assert_eq!(tables.len(), 3);
        tables.iter().for_each(|t| check(t, &[&[1.0]]));
    }

    #[test]
    fn order_two_hats() {
        let tables = build_tables(&uniform_knots(4, 2));
        assert_eq!(tables.len(), 4);
        // first: only the second interval is non-degenerate, falling 1 - r
        check(&tables[0], &[&[0.0, 0.0], &[1.0, -1.0]]);
        // interior: rising r, then falling 1 - r
        check(&tables[1], &[&[0.0, 1.0], &[1.0, -1.0]]);
        check(&tables[2], &[&[0.0, 1.0], &[1.0, -1.0]]);
        // last: only the first interval is non-degenerate
        check(&tables[3], &[&[0.0, 1.0], &[0.0, 0.0]]);
    }

    #[test]
    fn uniform_cubic() {
        let tables = build_tables(&uniform_knots(11, 4));
        assert_eq!(tables.len(), 13);
        let s = 1.0 / 6.0;
        check(
            &tables[5],
            &[
                &[0.0, 0.0, 0.0, s],
                &[s, 3.0 * s, 3.0 * s, -3.0 * s],
                &[4.0 * s, 0.0, -6.0 * s, 3.0 * s],
                &[s, -3.0 * s, 3.0 * s, -s],
            ],
        );
        assert_eq!(tables[5].order(), 4);
        assert_eq!(tables[5].interval(3).len(), 4);
    }

    #[test]
    fn clamped_cubic_end() {
        let tables = build_tables(&uniform_knots(11, 4));
        // the first cubic is (1 - r)³ on the first grid interval
        check(
            &tables[0],
            &[
                &[0.0; 4],
                &[0.0; 4],
                &[0.0; 4],
                &[1.0, -3.0, 3.0, -1.0],
            ],
        );
        // and the last is r³ on the final grid interval
        check(
            &tables[12],
            &[
                &[0.0, 0.0, 0.0, 1.0],
                &[0.0; 4],
                &[0.0; 4],
                &[0.0; 4],
            ],
        );
    }
}
