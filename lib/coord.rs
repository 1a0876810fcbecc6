//! Real and contour coordinates.
//!
//! B-splines can be evaluated either at a real grid coordinate or at a point
//! on the ECS contour. Both cases share the same algebra; they differ only in
//! which copy of the grid (real or contour-mapped) the local interval
//! coordinate is measured against. [`Coordinate`] captures that difference so
//! that a single generic routine serves both.

use ndarray as nd;
use num_complex::Complex64 as C64;
use num_traits::Num;
use crate::ecs::Contour;

/// A point at which B-splines can be evaluated.
pub trait Coordinate: Num + Copy + Into<C64> {
    /// Real pre-image of this point on the grid.
    fn preimage(self, contour: &Contour) -> f64;

    /// Select the copy of the grid nodes this coordinate is measured against.
    fn nodes<'a>(grid: &'a nd::Array1<f64>, ecs_grid: &'a nd::Array1<C64>)
        -> &'a nd::Array1<Self>;
}

impl Coordinate for f64 {
    fn preimage(self, _contour: &Contour) -> f64 { self }

    fn nodes<'a>(grid: &'a nd::Array1<f64>, _ecs_grid: &'a nd::Array1<C64>)
        -> &'a nd::Array1<Self>
    {
        grid
    }
}

impl Coordinate for C64 {
    fn preimage(self, contour: &Contour) -> f64 { contour.x(self) }

    fn nodes<'a>(_grid: &'a nd::Array1<f64>, ecs_grid: &'a nd::Array1<C64>)
        -> &'a nd::Array1<Self>
    {
        ecs_grid
    }
}
