//! Node distributions for the real radial grid.
//!
//! Each distribution is a pure function of the node index `i ∊ {0, ..., n -
//! 1}`, the node count `n`, the grid bounds and (where applicable) a single
//! shape parameter. The formulas are kept exactly as the reference radial
//! codes define them, including the quirks of [`sinlike`] and
//! [`parabolic_linear`], which scale by `xmax` rather than `xmax - xmin`.
//!
//! ```
//! use ecspline::sequence::Sequence;
//!
//! let grid = Sequence::Exponential(3.0).grid(0.0, 10.0, 11);
//! assert_eq!(grid[0], 0.0);
//! assert!((grid[10] - 10.0).abs() < 1e-12);
//! // nodes cluster near xmin
//! assert!(grid[1] - grid[0] < grid[10] - grid[9]);
//! ```

use std::f64::consts::FRAC_PI_2;
use ndarray as nd;
use crate::error::BasisError;

/// Uniform spacing.
pub fn linear(i: usize, n: usize, xmin: f64, xmax: f64) -> f64 {
    xmin + ((xmax - xmin) * i as f64) / (n - 1) as f64
}

/// Exponential accumulation toward `xmin`, with strength `g`.
///
/// Nodes approach uniform spacing as `g → 0` and pile up at `xmin` as `g →
/// ∞`; `g = 0` itself is singular.
pub fn exponential(i: usize, n: usize, g: f64, xmin: f64, xmax: f64) -> f64 {
    xmin
        + (xmax - xmin) * ((g * i as f64 / (n - 1) as f64).exp() - 1.0)
        / (g.exp() - 1.0)
}

/// Sine-shaped distribution with power `a`.
///
/// Note that the sine is scaled by `xmax` alone, so the final node sits at
/// `xmin + xmax`; this only coincides with `xmax` for `xmin = 0`.
pub fn sinlike(i: usize, n: usize, a: f64, xmin: f64, xmax: f64) -> f64 {
    xmin + xmax * (FRAC_PI_2 * (i as f64 / (n - 1) as f64).powf(a)).sin()
}

/// Quadratic growth out to a break node determined by `x0`, linear beyond.
pub fn parabolic_linear(i: usize, n: usize, x0: f64, xmin: f64, xmax: f64)
    -> f64
{
    let m = (n - 1) as f64;
    let i0 = (2.0 * m / (1.0 + (xmax - xmin) / (x0 - xmin))).floor();
    let a0 = xmax / i0 / (2.0 * m - i0);
    let a1 = 2.0 * xmax / (2.0 * m - i0);
    let a2 = -xmax * i0 / (2.0 * m - i0);
    let i = i as f64;
    if i < i0 {
        xmin + a0 * i * i
    } else {
        xmin + a2 + a1 * i
    }
}

/// Node distribution selector, carrying its shape parameter.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum Sequence {
    /// See [`linear`].
    #[default]
    Linear,
    /// See [`exponential`]; holds the accumulation strength `g`.
    Exponential(f64),
    /// See [`sinlike`]; holds the power `a`.
    Sinlike(f64),
    /// See [`parabolic_linear`]; holds the break position `x0`.
    ParabolicLinear(f64),
}

impl Sequence {
    /// Parse a sequence from its (case-insensitive) name and an optional shape
    /// parameter.
    ///
    /// Accepted names are `linear`, `exponential`, `sinlike` and `parabolic`.
    /// The parameter is ignored for `linear` and required for the others.
    pub fn from_name(name: &str, param: Option<f64>)
        -> Result<Self, BasisError>
    {
        let lower = name.to_lowercase();
        let need = || {
            param.ok_or_else(|| BasisError::MissingParameter(lower.clone()))
        };
        match lower.as_str() {
            "linear" => Ok(Self::Linear),
            "exponential" => need().map(Self::Exponential),
            "sinlike" => need().map(Self::Sinlike),
            "parabolic" => need().map(Self::ParabolicLinear),
            _ => Err(BasisError::UnknownSequence(name.to_string())),
        }
    }

    /// Return the name accepted by [`Self::from_name`].
    pub fn name(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Exponential(_) => "exponential",
            Self::Sinlike(_) => "sinlike",
            Self::ParabolicLinear(_) => "parabolic",
        }
    }

    /// Compute the position of the `i`-th of `n` nodes.
    pub fn node(&self, i: usize, n: usize, xmin: f64, xmax: f64) -> f64 {
        match *self {
            Self::Linear => linear(i, n, xmin, xmax),
            Self::Exponential(g) => exponential(i, n, g, xmin, xmax),
            Self::Sinlike(a) => sinlike(i, n, a, xmin, xmax),
            Self::ParabolicLinear(x0) => parabolic_linear(i, n, x0, xmin, xmax),
        }
    }

    /// Generate all `n` nodes.
    ///
    /// No checks are performed on the result; see
    /// [`BSpline::new`][crate::bspline::BSpline::new] for a validated path.
    pub fn grid(&self, xmin: f64, xmax: f64, n: usize) -> nd::Array1<f64> {
        (0..n).map(|i| self.node(i, n, xmin, xmax)).collect()
    }
}
