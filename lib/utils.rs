//! Miscellaneous tools.

use ndarray as nd;
use num_traits::Num;

/// Compensated (Kahan) accumulator.
///
/// Tracks the low-order bits lost in each addition and feeds them back into
/// the next one, so that long sums of many small contributions (quadrature
/// points, grid intervals) do not drift.
///
/// ```
/// use ecspline::utils::KahanSum;
///
/// let acc: KahanSum<f64>
///     = std::iter::once(1.0)
///     .chain(std::iter::repeat(1e-16).take(10_000))
///     .collect();
/// assert!((acc.total() - (1.0 + 1e-12)).abs() < 1e-15);
/// ```
#[derive(Copy, Clone, Debug)]
pub struct KahanSum<A> {
    sum: A,
    c: A,
}

impl<A> Default for KahanSum<A>
where A: Num + Copy
{
    fn default() -> Self { Self::new() }
}

impl<A> KahanSum<A>
where A: Num + Copy
{
    /// Create a new, empty accumulator.
    pub fn new() -> Self { Self { sum: A::zero(), c: A::zero() } }

    /// Add a single element.
    pub fn push(&mut self, elem: A) {
        let y = elem - self.c;
        let t = self.sum + y;
        self.c = (t - self.sum) - y;
        self.sum = t;
    }

    /// Get the current value of the sum.
    pub fn total(&self) -> A { self.sum }
}

impl<A> Extend<A> for KahanSum<A>
where A: Num + Copy
{
    fn extend<I>(&mut self, iter: I)
    where I: IntoIterator<Item = A>
    {
        iter.into_iter().for_each(|elem| self.push(elem));
    }
}

impl<A> FromIterator<A> for KahanSum<A>
where A: Num + Copy
{
    fn from_iter<I>(iter: I) -> Self
    where I: IntoIterator<Item = A>
    {
        let mut acc = Self::new();
        acc.extend(iter);
        acc
    }
}

/// Precomputed falling factorials `n (n - 1) ⋯ (n - k + 1)`.
///
/// These are the factors picked up by the monomial `r^n` under `k`
/// derivatives.
#[derive(Clone, Debug)]
pub struct Factorials {
    // partial[[n, k]] = n! / (n - k)!, zero for k > n
    partial: nd::Array2<f64>,
}

impl Factorials {
    /// Build tables for all `0 ≤ k, n ≤ dim`.
    pub fn new(dim: usize) -> Self {
        let mut partial: nd::Array2<f64> = nd::Array2::zeros((dim + 1, dim + 1));
        for n in 0..=dim {
            partial[[n, 0]] = 1.0;
            for k in 1..=n {
                partial[[n, k]] = partial[[n, k - 1]] * (n - k + 1) as f64;
            }
        }
        Self { partial }
    }

    /// Largest `n` covered by the tables.
    pub fn dim(&self) -> usize { self.partial.nrows() - 1 }

    /// Falling factorial `n! / (n - k)!`.
    ///
    /// *Panics if `n` or `k` exceeds the table dimension*.
    pub fn partial(&self, n: usize, k: usize) -> f64 { self.partial[[n, k]] }

    /// Full factorial `n!`.
    ///
    /// *Panics if `n` exceeds the table dimension*.
    pub fn factorial(&self, n: usize) -> f64 { self.partial[[n, n]] }
}
