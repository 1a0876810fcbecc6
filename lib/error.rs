//! Collection of all error types.
//!
//! All errors derive [`thiserror::Error`], making them composable when allowed
//! and compatible with application code using [`anyhow`][anyhow].
//!
//! Only construction of a basis can fail; evaluation and integration of an
//! already-built [`BSpline`][crate::bspline::BSpline] are infallible, returning
//! zero outside the grid or outside the support of a basis function.
//!
//! [anyhow]: https://crates.io/crates/anyhow

use ndarray as nd;
use thiserror::Error;

/// Returned when a basis is constructed from invalid parameters.
#[derive(Debug, Error)]
pub enum BasisError {
    /// Returned when a spline order less than 1 is requested.
    #[error("spline order must be at least 1; got {0}")]
    BadOrder(usize),

    /// Returned when fewer than two grid nodes are requested.
    #[error("number of grid nodes must be at least 2; got {0}")]
    BadNodes(usize),

    /// Returned when the grid bounds are non-finite or out of order.
    #[error("grid bounds must be finite with xmin < xmax; got ({0}, {1})")]
    BadBounds(f64, f64),

    /// Returned when the ECS rotation fraction lies outside `(0, 1]`.
    #[error("ecs rotation fraction must lie in (0, 1]; got {0}")]
    BadEcsR0(f64),

    /// Returned when the ECS rotation point cannot be located on the grid.
    #[error("ecs rotation point {0} does not lie on the generated grid")]
    EcsOutsideGrid(f64),

    /// Returned when a node sequence produces a grid that is not strictly
    /// increasing; holds the first offending node index.
    #[error("generated grid is not strictly increasing at node {0}")]
    NotIncreasing(usize),

    /// Returned when a node sequence name is not recognized.
    #[error("unknown node sequence '{0}'")]
    UnknownSequence(String),

    /// Returned when a node sequence requires a shape parameter that was not
    /// given.
    #[error("node sequence '{0}' requires a shape parameter")]
    MissingParameter(String),
}

impl BasisError {
    pub(crate) fn check_order(order: usize) -> Result<(), Self> {
        (order >= 1).then_some(()).ok_or(Self::BadOrder(order))
    }

    pub(crate) fn check_nodes(nodes: usize) -> Result<(), Self> {
        (nodes >= 2).then_some(()).ok_or(Self::BadNodes(nodes))
    }

    pub(crate) fn check_bounds(xmin: f64, xmax: f64) -> Result<(), Self> {
        (xmin.is_finite() && xmax.is_finite() && xmin < xmax)
            .then_some(())
            .ok_or(Self::BadBounds(xmin, xmax))
    }

    pub(crate) fn check_ecs_r0(r0: f64) -> Result<(), Self> {
        (r0 > 0.0 && r0 <= 1.0).then_some(()).ok_or(Self::BadEcsR0(r0))
    }

    pub(crate) fn check_increasing<S>(grid: &nd::ArrayBase<S, nd::Ix1>)
        -> Result<(), Self>
    where S: nd::Data<Elem = f64>
    {
        match grid.iter().zip(grid.iter().skip(1)).position(|(a, b)| !(a < b)) {
            Some(k) => Err(Self::NotIncreasing(k + 1)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validators_accept_good_values() {
        assert!(BasisError::check_order(1).is_ok());
        assert!(BasisError::check_nodes(2).is_ok());
        assert!(BasisError::check_bounds(-1.0, 1.0).is_ok());
        assert!(BasisError::check_ecs_r0(1.0).is_ok());
        assert!(BasisError::check_increasing(&nd::array![0.0, 0.5, 2.0]).is_ok());
    }

    #[test]
    fn validators_reject_bad_values() {
        assert!(matches!(BasisError::check_order(0), Err(BasisError::BadOrder(0))));
        assert!(matches!(BasisError::check_nodes(1), Err(BasisError::BadNodes(1))));
        assert!(BasisError::check_bounds(1.0, 1.0).is_err());
        assert!(BasisError::check_bounds(0.0, f64::NAN).is_err());
        assert!(BasisError::check_ecs_r0(0.0).is_err());
        assert!(BasisError::check_ecs_r0(1.5).is_err());
        assert!(matches!(
            BasisError::check_increasing(&nd::array![0.0, 1.0, 1.0, 2.0]),
            Err(BasisError::NotIncreasing(2)),
        ));
    }
}
