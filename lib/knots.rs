//! Clamped knot sequences on the ECS contour.

use std::ops::Deref;
use ndarray as nd;
use num_complex::Complex64 as C64;
use crate::ecs::Contour;

/// Knot sequence for B-splines of a fixed order over a grid of `n` nodes.
///
/// Holds `n + 2 (order - 1)` complex knots: the contour image of the first
/// node repeated `order` times, the images of the interior nodes, and the
/// image of the last node repeated `order` times. The repeated end knots clamp
/// the basis so that exactly one B-spline is non-zero at either end of the
/// grid.
#[derive(Clone, Debug)]
pub struct KnotVector {
    knots: nd::Array1<C64>,
    order: usize,
}

impl KnotVector {
    /// Build the clamped knot sequence for `grid` mapped through `contour`.
    ///
    /// *Panics if `grid` has fewer than 2 nodes or `order` is zero*.
    pub fn new<S>(grid: &nd::ArrayBase<S, nd::Ix1>, contour: &Contour, order: usize)
        -> Self
    where S: nd::Data<Elem = f64>
    {
        let n = grid.len();
        assert!(n >= 2 && order >= 1, "knots::KnotVector::new: degenerate input");
        let first = contour.R(grid[0]);
        let last = contour.R(grid[n - 1]);
        let knots: nd::Array1<C64>
            = std::iter::repeat(first).take(order)
            .chain(grid.slice(nd::s![1..n - 1]).iter().map(|x| contour.R(*x)))
            .chain(std::iter::repeat(last).take(order))
            .collect();
        Self { knots, order }
    }

    /// Spline order these knots were built for.
    pub fn order(&self) -> usize { self.order }

    /// The `order + 1` knots supporting the `bs`-th B-spline.
    ///
    /// *Panics if `bs` is out of range*.
    pub fn window(&self, bs: usize) -> nd::ArrayView1<'_, C64> {
        self.knots.slice(nd::s![bs..bs + self.order + 1])
    }
}

impl Deref for KnotVector {
    type Target = nd::Array1<C64>;

    fn deref(&self) -> &Self::Target { &self.knots }
}
