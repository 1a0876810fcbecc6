//! Exterior complex scaling (ECS).
//!
//! The real coordinate is continued onto a contour in the complex plane that
//! follows the real axis up to a point *r*₀ and is then rotated by an angle
//! *θ*:
//! ```text
//!        ⎧ x                       x ≤ r₀
//! R(x) = ⎨
//!        ⎩ r₀ + (x - r₀) exp(i θ)  x > r₀
//! ```
//! Outgoing waves continued along the rotated ray decay exponentially, which
//! absorbs flux that would otherwise reflect off the end of the grid.
//!
//! [`Ecs`] holds the user-facing parameters, with *r*₀ given as a fraction of
//! the grid extent; [`Contour`] holds the resolved map, with *r*₀ snapped onto
//! a grid node so that no grid interval straddles the bend.

use std::f64::consts::FRAC_PI_4;
use ndarray as nd;
use num_complex::Complex64 as C64;
use serde::{ Deserialize, Serialize };
use crate::error::BasisError;

/// ECS parameters.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ecs {
    /// Position of the rotation point as a fraction of the grid extent, in
    /// `(0, 1]`. A value of exactly 1 disables the rotation.
    pub r0: f64,
    /// Rotation angle (radians).
    pub theta: f64,
}

impl Default for Ecs {
    /// Rotation by π/4 over the outermost 10% of the grid.
    fn default() -> Self { Self { r0: 0.9, theta: FRAC_PI_4 } }
}

impl Ecs {
    /// No rotation; the contour is the real axis.
    pub fn none() -> Self { Self { r0: 1.0, theta: 0.0 } }

    /// Return `true` if these parameters describe a rotated contour.
    pub fn is_rotated(&self) -> bool { self.r0 != 1.0 }

    /// Resolve these parameters against a grid spanning `[xmin, xmax]`.
    ///
    /// `locate` must return the index of the grid interval containing a given
    /// real point (inclusive of its endpoints); the rotation point is snapped
    /// to the lower node of that interval.
    pub fn resolve<S, F>(
        &self,
        grid: &nd::ArrayBase<S, nd::Ix1>,
        xmin: f64,
        xmax: f64,
        locate: F,
    ) -> Result<Contour, BasisError>
    where
        S: nd::Data<Elem = f64>,
        F: Fn(f64) -> Option<usize>,
    {
        BasisError::check_ecs_r0(self.r0)?;
        if !self.is_rotated() { return Ok(Contour::identity()); }
        let target = self.r0 * (xmax - xmin) + xmin;
        let i = locate(target).ok_or(BasisError::EcsOutsideGrid(target))?;
        log::debug!(
            "ecs::resolve: rotation point {:.6e} snapped to node {} at {:.6e}",
            target, i, grid[i],
        );
        Ok(Contour { r0: grid[i], theta: self.theta })
    }
}

/// Resolved complex contour map.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Contour {
    r0: f64,
    theta: f64,
}

impl Contour {
    /// The real axis.
    pub fn identity() -> Self { Self { r0: f64::INFINITY, theta: 0.0 } }

    /// Create a contour rotated by `theta` beyond the absolute position `r0`.
    pub fn new(r0: f64, theta: f64) -> Self { Self { r0, theta } }

    /// Absolute position of the rotation point (`+∞` for the identity).
    pub fn r0(&self) -> f64 { self.r0 }

    /// Rotation angle.
    pub fn theta(&self) -> f64 { self.theta }

    /// Map a real coordinate onto the contour.
    pub fn R(&self, x: f64) -> C64 {
        if x <= self.r0 {
            C64::from(x)
        } else {
            self.r0 + (x - self.r0) * C64::from_polar(1.0, self.theta)
        }
    }

    /// Recover the real pre-image of a contour point.
    pub fn x(&self, R: C64) -> f64 {
        if R.im == 0.0 {
            R.re
        } else {
            self.r0 + ((R - self.r0) * C64::from_polar(1.0, -self.theta)).re
        }
    }

    /// Local scaling factor `dR/dx`.
    pub fn q(&self, x: f64) -> C64 {
        if x <= self.r0 {
            C64::from(1.0)
        } else {
            C64::from_polar(1.0, self.theta)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn locate(grid: &nd::Array1<f64>) -> impl Fn(f64) -> Option<usize> + '_ {
        move |x| {
            grid.iter().zip(grid.iter().skip(1))
                .position(|(a, b)| *a <= x && x <= *b)
        }
    }

    #[test]
    fn identity_contour() {
        let c = Contour::identity();
        assert_eq!(c.R(3.5), C64::from(3.5));
        assert_eq!(c.x(C64::from(3.5)), 3.5);
        assert_eq!(c.q(1e300), C64::from(1.0));
    }

    #[test]
    fn rotated_branch_and_inverse() {
        let c = Contour::new(2.0, FRAC_PI_4);
        assert_eq!(c.R(1.0), C64::from(1.0));
        assert_eq!(c.R(2.0), C64::from(2.0));
        let z = c.R(4.0);
        assert_relative_eq!(z.re, 2.0 + 2.0 * FRAC_PI_4.cos(), epsilon = 1e-14);
        assert_relative_eq!(z.im, 2.0 * FRAC_PI_4.sin(), epsilon = 1e-14);
        assert_relative_eq!(c.x(z), 4.0, epsilon = 1e-14);
        assert_relative_eq!(c.q(4.0).arg(), FRAC_PI_4, epsilon = 1e-14);
    }

    #[test]
    fn contour_is_continuous_at_r0() {
        let c = Contour::new(2.0, 0.3);
        let below = c.R(2.0);
        let above = c.R(2.0 + 1e-12);
        assert!((above - below).norm() < 1e-11);
    }

    #[test]
    fn resolve_snaps_to_lower_node() {
        let grid: nd::Array1<f64> = nd::Array1::linspace(0.0, 10.0, 11);
        let c = Ecs { r0: 0.75, theta: 0.5 }
            .resolve(&grid, 0.0, 10.0, locate(&grid))
            .unwrap();
        assert_eq!(c.r0(), 7.0);
        assert_eq!(c.theta(), 0.5);

        let c = Ecs::none().resolve(&grid, 0.0, 10.0, locate(&grid)).unwrap();
        assert_eq!(c, Contour::identity());
    }

    #[test]
    fn resolve_rejects_bad_fraction() {
        let grid: nd::Array1<f64> = nd::array![0.0, 1.0];
        let res = Ecs { r0: 0.0, theta: 0.5 }
            .resolve(&grid, 0.0, 1.0, locate(&grid));
        assert!(matches!(res, Err(BasisError::BadEcsR0(_))));
        let res = Ecs { r0: 1.2, theta: 0.5 }
            .resolve(&grid, 0.0, 1.0, locate(&grid));
        assert!(matches!(res, Err(BasisError::BadEcsR0(_))));
    }
}
