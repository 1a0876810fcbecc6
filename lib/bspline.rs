//! B-spline basis over a one-dimensional radial grid, optionally continued
//! onto an exterior complex scaling contour.
//!
//! A [`BSpline`] is built once from a node distribution and ECS parameters and
//! is read-only afterward (apart from the two flags selecting which boundary
//! functions count as degrees of freedom), so it can be shared freely between
//! threads assembling matrix elements.
//!
//! ```
//! use ecspline::{ bspline::BSpline, ecs::Ecs, sequence::Sequence };
//!
//! let mut basis
//!     = BSpline::new(4, 11, 0.0, 10.0, Sequence::Linear, Ecs::none()).unwrap();
//! assert_eq!(basis.get_num_bsplines(), 13);
//! basis.set_skip_first(true);
//! basis.set_skip_last(true);
//! assert_eq!(basis.get_num_bsplines(), 11);
//!
//! // B-splines sum to 1 anywhere on the grid
//! let total: f64
//!     = (0..basis.get_num_bsplines_total())
//!     .map(|bs| basis.bspline(3.3, bs, 0).re)
//!     .sum();
//! assert!((total - 1.0).abs() < 1e-12);
//! ```

use std::ops::Range;
use ndarray as nd;
use num_complex::Complex64 as C64;
use crate::{
    Arr1,
    coeffs::{ self, CoefficientTable },
    coord::Coordinate,
    ecs::{ Contour, Ecs },
    error::BasisError,
    knots::KnotVector,
    quad::GaussLegendre,
    sequence::Sequence,
    utils::{ Factorials, KahanSum },
};

pub type BasisResult<T> = Result<T, BasisError>;

// index of the grid interval [grid[i], grid[i + 1]] containing `x`, with
// shared nodes resolving to the lower interval
fn locate<S>(grid: &Arr1<S>, x: f64) -> Option<usize>
where S: nd::Data<Elem = f64>
{
    let n = grid.len();
    if n < 2 || !(grid[0] <= x && x <= grid[n - 1]) { return None; }
    // smallest k with grid[k] >= x
    let (mut lo, mut hi): (usize, usize) = (0, n - 1);
    while lo < hi {
        let mid = (lo + hi) / 2;
        if grid[mid] < x { lo = mid + 1; } else { hi = mid; }
    }
    Some(lo.saturating_sub(1))
}

/// B-spline basis of fixed order on a (possibly complex-scaled) grid.
#[derive(Clone, Debug)]
pub struct BSpline {
    // real node positions
    grid: nd::Array1<f64>,
    // node positions mapped onto the contour
    ecs_grid: nd::Array1<C64>,
    knots: KnotVector,
    contour: Contour,
    quad: GaussLegendre,
    // one table per B-spline
    coeffs: Vec<CoefficientTable>,
    factorials: Factorials,
    order: usize,
    num_bsplines: usize,
    // exclude the first/last B-spline to force zero boundary values
    skip_first: bool,
    skip_last: bool,
}

impl BSpline {
    /// Build a basis of B-splines of order `order` (polynomial degree `order -
    /// 1`) on `nodes` grid points distributed over `[xmin, xmax]` according to
    /// `seq`, with the grid continued onto the contour described by `ecs`.
    ///
    /// The basis holds `(nodes - 1) + (order - 1)` functions, each supported on
    /// `order` consecutive grid intervals.
    pub fn new(
        order: usize,
        nodes: usize,
        xmin: f64,
        xmax: f64,
        seq: Sequence,
        ecs: Ecs,
    ) -> BasisResult<Self>
    {
        BasisError::check_order(order)?;
        BasisError::check_nodes(nodes)?;
        BasisError::check_bounds(xmin, xmax)?;
        let grid: nd::Array1<f64> = seq.grid(xmin, xmax, nodes);
        BasisError::check_increasing(&grid)?;
        let contour = ecs.resolve(&grid, xmin, xmax, |x| locate(&grid, x))?;
        let ecs_grid: nd::Array1<C64> = grid.mapv(|x| contour.R(x));
        let knots = KnotVector::new(&grid, &contour, order);
        let coeffs = coeffs::build_tables(&knots);
        let num_bsplines = (nodes - 1) + (order - 1);
        log::debug!(
            "bspline::BSpline::new: {} {} B-splines of order {} on {} nodes \
            over [{:.3e}, {:.3e}]",
            num_bsplines, seq.name(), order, nodes, grid[0], grid[nodes - 1],
        );
        Ok(Self {
            grid,
            ecs_grid,
            knots,
            contour,
            quad: GaussLegendre::default(),
            coeffs,
            factorials: Factorials::new(order),
            order,
            num_bsplines,
            skip_first: false,
            skip_last: false,
        })
    }

    /// Get a reference to the real node positions.
    pub fn get_grid(&self) -> &nd::Array1<f64> { &self.grid }

    /// Get a reference to the node positions mapped onto the contour.
    pub fn get_ecs_grid(&self) -> &nd::Array1<C64> { &self.ecs_grid }

    /// Get a reference to the clamped knot sequence.
    pub fn get_knots(&self) -> &KnotVector { &self.knots }

    /// Get a reference to the resolved contour map.
    pub fn get_contour(&self) -> &Contour { &self.contour }

    /// Get the coefficient table of the `bs`-th B-spline.
    pub fn get_coefficients(&self, bs: usize) -> Option<&CoefficientTable> {
        self.coeffs.get(bs)
    }

    /// Get the order of the B-splines.
    pub fn get_order(&self) -> usize { self.order }

    /// Get the number of grid nodes.
    pub fn get_nodes(&self) -> usize { self.grid.len() }

    /// Get the number of B-splines counted as degrees of freedom, i.e. after
    /// any skipped boundary functions are removed.
    pub fn get_num_bsplines(&self) -> usize {
        self.num_bsplines
            - usize::from(self.skip_first)
            - usize::from(self.skip_last)
    }

    /// Get the total number of B-splines, ignoring skip flags.
    pub fn get_num_bsplines_total(&self) -> usize { self.num_bsplines }

    /// Range of B-spline indices counted as degrees of freedom.
    pub fn active_range(&self) -> Range<usize> {
        let start = usize::from(self.skip_first);
        start..start + self.get_num_bsplines()
    }

    /// Exclude (or re-include) the first B-spline from the degrees of
    /// freedom, forcing expanded functions to vanish at the first node.
    pub fn set_skip_first(&mut self, flag: bool) { self.skip_first = flag; }

    /// Exclude (or re-include) the last B-spline from the degrees of freedom,
    /// forcing expanded functions to vanish at the last node.
    pub fn set_skip_last(&mut self, flag: bool) { self.skip_last = flag; }

    /// Return the index `i` of the grid interval `[grid[i], grid[i + 1]]`
    /// containing `x`, or `None` if `x` lies off the grid.
    ///
    /// Both ends of each interval are inclusive; a point on a node shared by two
    /// intervals belongs to the lower one.
    pub fn which_interval(&self, x: f64) -> Option<usize> {
        locate(&self.grid, x)
    }

    // pull points lying within rounding distance outside either end of the grid
    // back onto it; the round trip R -> x through the rotated contour can land a
    // few ulp past the last node
    fn snap_to_ends(&self, x: f64) -> f64 {
        let lo = self.grid[0];
        let hi = self.grid[self.grid.len() - 1];
        let tol = 8.0 * f64::EPSILON * lo.abs().max(hi.abs()).max(hi - lo);
        if x < lo && lo - x <= tol {
            lo
        } else if x > hi && x - hi <= tol {
            hi
        } else {
            x
        }
    }

    /// Evaluate the `dn`-th derivative of the `bs`-th B-spline.
    ///
    /// `x` may be a real grid coordinate (`f64`, derivatives taken with respect
    /// to `x`) or a point on the contour (`C64`, derivatives taken with respect
    /// to the contour coordinate). Returns zero if `bs` is out of range or `x`
    /// lies outside the support of the B-spline. Points whose real pre-image
    /// falls within rounding distance of either end of the grid are treated as
    /// lying on it.
    pub fn bspline<X>(&self, x: X, bs: usize, dn: usize) -> C64
    where X: Coordinate
    {
        let zero = C64::from(0.0);
        if bs >= self.num_bsplines { return zero; }
        let xr = self.snap_to_ends(x.preimage(&self.contour));
        let Some(i) = self.which_interval(xr) else { return zero; };
        // which of the B-spline's own intervals contains x
        let interval = match (i + self.order - 1).checked_sub(bs) {
            Some(j) if j < self.order => j,
            _ => return zero,
        };
        let nodes = X::nodes(&self.grid, &self.ecs_grid);
        let inv_width: X = X::one() / (nodes[i + 1] - nodes[i]);
        let r: X = (x - nodes[i]) * inv_width;
        let coeff = &self.coeffs[bs];
        let mut rk: X = X::one();
        let mut sum: C64 = zero;
        for d in dn..self.order {
            let rkc: C64 = rk.into();
            sum += coeff[(interval, d)] * self.factorials.partial(d, dn) * rkc;
            rk = rk * r;
        }
        let scale: C64 = (0..dn).fold(X::one(), |acc, _| acc * inv_width).into();
        sum * scale
    }

    /// Evaluate the `dn`-th derivative of the `bs`-th B-spline at each of a
    /// series of points.
    pub fn bspline_many<S, X>(&self, x: &Arr1<S>, bs: usize, dn: usize)
        -> nd::Array1<C64>
    where
        S: nd::Data<Elem = X>,
        X: Coordinate,
    {
        x.mapv(|xk| self.bspline(xk, bs, dn))
    }

    /// Sample every B-spline counted as a degree of freedom on a series of
    /// real points.
    ///
    /// Row `k` of the returned array holds the `k`-th active function (i.e.
    /// raw index `k + 1` if the first B-spline is skipped).
    pub fn sample_table<S>(&self, x: &Arr1<S>, dn: usize) -> nd::Array2<C64>
    where S: nd::Data<Elem = f64>
    {
        let active = self.active_range();
        let mut table: nd::Array2<C64>
            = nd::Array2::zeros((active.len(), x.len()));
        table.outer_iter_mut().zip(active)
            .for_each(|(mut row, bs)| {
                row.assign(&self.bspline_many(x, bs, dn));
            });
        table
    }

    /// Evaluate the `dn`-th derivative of the function whose expansion
    /// coefficients over the active B-splines are `fc` at a real point `x`.
    ///
    /// `fc[k]` multiplies the `k`-th active B-spline. Coefficients missing
    /// from the end of `fc` are taken to be zero. Returns zero off the grid.
    pub fn function_evaluate<S>(&self, x: f64, fc: &Arr1<S>, dn: usize) -> C64
    where S: nd::Data<Elem = C64>
    {
        let zero = C64::from(0.0);
        let Some(i) = self.which_interval(x) else { return zero; };
        let nskip = usize::from(self.skip_first);
        let bsmin = nskip.max(i);
        let bsmax = self.num_bsplines.min(i + self.order);
        (bsmin..bsmax)
            .filter_map(|bs| {
                fc.get(bs - nskip).map(|c| self.bspline(x, bs, dn) * *c)
            })
            .sum()
    }

    /// Like [`Self::function_evaluate`], but for a series of points.
    pub fn function_evaluate_many<S, T>(
        &self,
        x: &Arr1<S>,
        fc: &Arr1<T>,
        dn: usize,
    ) -> nd::Array1<C64>
    where
        S: nd::Data<Elem = f64>,
        T: nd::Data<Elem = C64>,
    {
        x.mapv(|xk| self.function_evaluate(xk, fc, dn))
    }

    /// Compute the overlap integral of the `dn1`-th derivative of B-spline
    /// `bs1` with the `dn2`-th derivative of B-spline `bs2` over the whole
    /// contour.
    pub fn integrate(&self, bs1: usize, bs2: usize, dn1: usize, dn2: usize)
        -> C64
    {
        self.integrate_with(bs1, bs2, dn1, dn2, |_| C64::from(1.0))
    }

    /// Like [`Self::integrate`], but with the integrand weighted by `f`, which
    /// receives the contour coordinate.
    pub fn integrate_with<F>(
        &self,
        bs1: usize,
        bs2: usize,
        dn1: usize,
        dn2: usize,
        f: F,
    ) -> C64
    where F: Fn(C64) -> C64
    {
        let bounds = (self.grid[0], self.grid[self.grid.len() - 1]);
        self.integrate_within(bounds, bs1, bs2, dn1, dn2, f)
    }

    /// Like [`Self::integrate_with`], but restricted to the part of the
    /// contour whose real pre-image lies within `bounds`.
    ///
    /// `bounds` is clipped to the grid; an empty intersection gives zero.
    /// Each grid interval is integrated separately by Gauss-Legendre quadrature
    /// along its (straight) image on the contour, and the per-interval results
    /// are combined with compensated summation.
    pub fn integrate_within<F>(
        &self,
        bounds: (f64, f64),
        bs1: usize,
        bs2: usize,
        dn1: usize,
        dn2: usize,
        f: F,
    ) -> C64
    where F: Fn(C64) -> C64
    {
        let zero = C64::from(0.0);
        // supports don't overlap
        if bs1.abs_diff(bs2) >= self.order { return zero; }
        let n = self.grid.len();
        let xmin = bounds.0.max(self.grid[0]);
        let xmax = bounds.1.min(self.grid[n - 1]);
        let (Some(imin), Some(imax))
            = (self.which_interval(xmin), self.which_interval(xmax))
            else { return zero; };
        if xmin > xmax { return zero; }
        let imin = imin.max(bs1.max(bs2).saturating_sub(self.order - 1));
        let imax = imax.min(bs1.min(bs2));
        let total: KahanSum<C64>
            = (imin..=imax)
            .map(|i| {
                let a = self.contour.R(xmin.max(self.grid[i]));
                let b = self.contour.R(xmax.min(self.grid[i + 1]));
                self.quad.integrate(a, b, |z| {
                    f(z) * (self.bspline(z, bs1, dn1) * self.bspline(z, bs2, dn2))
                })
            })
            .collect();
        total.total()
    }
}
