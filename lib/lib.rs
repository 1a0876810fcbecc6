#![allow(non_snake_case)]

//! Provides a B-spline basis over a one-dimensional radial grid for expanding
//! wavefunctions and operators, with optional exterior complex scaling of the
//! outer part of the grid.
//!
//! Provides implementations for the following:
//! - Node distributions: linear, exponential, sine-like, and
//!   parabolic-linear grids
//! - Exterior complex scaling: continuation of the grid onto a contour rotated
//!   into the complex plane beyond a chosen node
//! - Evaluation of B-splines of arbitrary order and their derivatives at real
//!   or contour points, and of functions expanded in the basis
//! - Matrix elements: Gauss-Legendre quadrature of weighted products of
//!   B-spline derivatives along the contour, and assembly of the standard
//!   radial blocks (overlap, kinetic energy, centrifugal term, model
//!   potentials)
//!
//! See [`docs`] for theoretical background.
//!
//! ```
//! use ecspline::{ bspline::BSpline, ecs::Ecs, sequence::Sequence };
//!
//! let basis = BSpline::new(
//!     7, 101, 0.0, 50.0,
//!     Sequence::Exponential(3.0),
//!     Ecs { r0: 0.8, theta: 0.3 },
//! ).unwrap();
//! let s_12 = basis.integrate(12, 13, 0, 0);
//! let t_12 = basis.integrate(12, 13, 1, 1) * 0.5;
//! assert!(s_12.re > 0.0);
//! assert!(t_12.im == 0.0); // both functions lie on the real part of the grid
//! ```

pub mod error;
pub mod utils;
pub mod sequence;
pub mod ecs;
pub mod quad;
pub mod knots;
pub mod coeffs;
pub mod coord;
pub mod bspline;
pub mod radial;
pub mod config;

pub mod docs;

pub(crate) const NOD_THRESHOLD: f64 = 1e-15;
pub(crate) const NGAUSS: usize = 64;
pub(crate) const DEF_MAXITERS: usize = 1000;

pub type Arr1<S> = ndarray::ArrayBase<S, ndarray::Ix1>;
pub type Arr2<S> = ndarray::ArrayBase<S, ndarray::Ix2>;
