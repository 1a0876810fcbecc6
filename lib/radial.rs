//! Matrix elements of the radial Schrödinger operator in a B-spline basis.
//!
//! For a radial wavefunction expanded as *u*(*r*) = Σ *c*ᵢ *B*ᵢ(*r*), the
//! reduced radial equation for angular momentum *l* becomes the generalized
//! eigenproblem *H* *c* = *E* *S* *c* with
//! ```text
//! S[i, j] = ∫ B[i] B[j] dr
//! H[i, j] = 1/2 ∫ B[i]' B[j]' dr + l (l + 1) / 2 ∫ B[i] B[j] / r² dr + ∫ B[i] V B[j] dr
//! ```
//! (atomic units), where integrals run along the ECS contour. Only the active
//! basis functions count, so the first row/column of each block corresponds to
//! B-spline 1 if the first function is skipped. Entries vanish for |*i* - *j*|
//! ≥ the spline order; blocks are nonetheless stored densely.

use ndarray as nd;
use num_complex::Complex64 as C64;
use serde::{ Deserialize, Serialize };
use crate::bspline::BSpline;

/// Model central potentials.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Potential {
    /// -Z / r
    Coulomb { z: f64 },
    /// -Z exp(-D r) / r
    Yukawa { z: f64, decay: f64 },
    /// -Z exp(-D r)
    Exponential { z: f64, decay: f64 },
}

impl Potential {
    /// Evaluate at a (possibly complex) radial coordinate.
    pub fn eval(&self, r: C64) -> C64 {
        match *self {
            Self::Coulomb { z } => -z / r,
            Self::Yukawa { z, decay } => -z * (-decay * r).exp() / r,
            Self::Exponential { z, decay } => -z * (-decay * r).exp(),
        }
    }
}

// fill an N × N block from a generator of raw B-spline index pairs, touching
// only entries within the band; symmetric blocks are mirrored
fn banded<F>(basis: &BSpline, symmetric: bool, elem: F) -> nd::Array2<C64>
where F: Fn(usize, usize) -> C64
{
    let n = basis.get_num_bsplines();
    let order = basis.get_order();
    let nskip = basis.active_range().start;
    let mut block: nd::Array2<C64> = nd::Array2::zeros((n, n));
    for i in 0..n {
        let jmin = if symmetric { i } else { i.saturating_sub(order - 1) };
        let jmax = n.min(i + order);
        for j in jmin..jmax {
            let val = elem(i + nskip, j + nskip);
            block[[i, j]] = val;
            if symmetric { block[[j, i]] = val; }
        }
    }
    block
}

/// Dense radial operator blocks over the active functions of a basis.
#[derive(Clone, Debug)]
pub struct RadialBlocks {
    overlap: nd::Array2<C64>,
    kinetic: nd::Array2<C64>,
    inv_r2: nd::Array2<C64>,
    inv_r: nd::Array2<C64>,
    ddr: nd::Array2<C64>,
}

impl RadialBlocks {
    /// Compute all blocks.
    pub fn new(basis: &BSpline) -> Self {
        let overlap = banded(basis, true, |i, j| basis.integrate(i, j, 0, 0));
        let kinetic
            = banded(basis, true, |i, j| 0.5 * basis.integrate(i, j, 1, 1));
        let inv_r2
            = banded(basis, true, |i, j| {
                basis.integrate_with(i, j, 0, 0, |r| (r * r).inv())
            });
        let inv_r
            = banded(basis, true, |i, j| {
                basis.integrate_with(i, j, 0, 0, |r| r.inv())
            });
        let ddr = banded(basis, false, |i, j| basis.integrate(i, j, 0, 1));
        log::debug!(
            "radial::RadialBlocks::new: computed {0} x {0} blocks",
            basis.get_num_bsplines(),
        );
        Self { overlap, kinetic, inv_r2, inv_r, ddr }
    }

    /// Get the number of rows (and columns) of each block.
    pub fn dim(&self) -> usize { self.overlap.nrows() }

    /// `∫ B[i] B[j] dr`
    pub fn get_overlap(&self) -> &nd::Array2<C64> { &self.overlap }

    /// `1/2 ∫ B[i]' B[j]' dr`
    pub fn get_kinetic(&self) -> &nd::Array2<C64> { &self.kinetic }

    /// `∫ B[i] B[j] / r² dr`
    pub fn get_inv_r2(&self) -> &nd::Array2<C64> { &self.inv_r2 }

    /// `∫ B[i] B[j] / r dr`
    pub fn get_inv_r(&self) -> &nd::Array2<C64> { &self.inv_r }

    /// `∫ B[i] B[j]' dr`
    pub fn get_ddr(&self) -> &nd::Array2<C64> { &self.ddr }

    /// Compute the block of a central potential, `∫ B[i] V B[j] dr`.
    ///
    /// *Panics if `basis` does not have the same number of active functions as
    /// the one used to build `self`*.
    pub fn potential(&self, basis: &BSpline, pot: &Potential) -> nd::Array2<C64> {
        assert_eq!(basis.get_num_bsplines(), self.dim());
        banded(basis, true, |i, j| {
            basis.integrate_with(i, j, 0, 0, |r| pot.eval(r))
        })
    }

    /// Assemble the radial Hamiltonian for angular momentum `l` from the
    /// kinetic and centrifugal blocks and any number of precomputed potential
    /// blocks.
    ///
    /// *Panics if any potential block has the wrong shape*.
    pub fn hamiltonian<'a, I>(&self, l: usize, potentials: I) -> nd::Array2<C64>
    where I: IntoIterator<Item = &'a nd::Array2<C64>>
    {
        let centrifugal = 0.5 * (l * (l + 1)) as f64;
        let mut H: nd::Array2<C64>
            = &self.kinetic + &self.inv_r2.mapv(|x| x * centrifugal);
        for V in potentials.into_iter() {
            assert_eq!(V.dim(), H.dim());
            H += V;
        }
        H
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray_linalg::Solve;
    use crate::{ ecs::Ecs, sequence::Sequence };

    fn basis(ecs: Ecs) -> BSpline {
        let mut basis
            = BSpline::new(6, 31, 0.0, 30.0, Sequence::Exponential(2.0), ecs)
            .unwrap();
        basis.set_skip_first(true);
        basis.set_skip_last(true);
        basis
    }

    #[test]
    fn potentials() {
        let r = C64::new(2.0, 0.5);
        let c = Potential::Coulomb { z: 2.0 };
        assert_abs_diff_eq!((c.eval(r) + 2.0 / r).norm(), 0.0, epsilon = 1e-15);
        let y = Potential::Yukawa { z: 1.0, decay: 0.0 };
        assert_abs_diff_eq!((y.eval(r) + 1.0 / r).norm(), 0.0, epsilon = 1e-15);
        let e = Potential::Exponential { z: 3.0, decay: 0.5 };
        assert_abs_diff_eq!(
            (e.eval(C64::from(2.0)) + 3.0 * (-1.0_f64).exp()).norm(),
            0.0,
            epsilon = 1e-15,
        );
    }

    #[test]
    fn potential_from_json() {
        let pot: Potential
            = serde_json::from_str(r#"{ "kind": "yukawa", "z": 1.5, "decay": 0.2 }"#)
            .unwrap();
        assert_eq!(pot, Potential::Yukawa { z: 1.5, decay: 0.2 });
    }

    #[test]
    fn block_structure() {
        let basis = basis(Ecs::none());
        let blocks = RadialBlocks::new(&basis);
        let n = basis.get_num_bsplines();
        assert_eq!(blocks.dim(), n);
        for i in 0..n {
            for j in 0..n {
                if i.abs_diff(j) >= 6 {
                    assert_eq!(blocks.get_overlap()[[i, j]], C64::from(0.0));
                    assert_eq!(blocks.get_ddr()[[i, j]], C64::from(0.0));
                }
                assert_eq!(blocks.get_overlap()[[i, j]], blocks.get_overlap()[[j, i]]);
                assert_eq!(blocks.get_kinetic()[[i, j]], blocks.get_kinetic()[[j, i]]);
            }
        }
        // row 0 is B-spline 1
        assert_eq!(blocks.get_overlap()[[0, 1]], basis.integrate(1, 2, 0, 0));
        assert_eq!(blocks.get_kinetic()[[2, 2]], 0.5 * basis.integrate(3, 3, 1, 1));
        assert_eq!(
            blocks.get_inv_r()[[4, 5]],
            basis.integrate_with(5, 6, 0, 0, |r| r.inv()),
        );
    }

    #[test]
    fn derivative_block_is_antisymmetric() {
        // ∫ B[i] B[j]' + ∫ B[i]' B[j] = [B[i] B[j]] = 0 with both ends pinned
        let basis = basis(Ecs::none());
        let blocks = RadialBlocks::new(&basis);
        let ddr = blocks.get_ddr();
        let sym = ddr + &ddr.t();
        sym.iter().for_each(|x| assert_abs_diff_eq!(x.norm(), 0.0, epsilon = 1e-12));
    }

    #[test]
    fn complex_symmetric_under_ecs() {
        let basis = basis(Ecs { r0: 0.8, theta: 0.5 });
        let blocks = RadialBlocks::new(&basis);
        let n = blocks.dim();
        let s = blocks.get_overlap();
        assert_eq!(s[[n - 2, n - 1]], s[[n - 1, n - 2]]);
        assert!(s[[n - 1, n - 1]].im.abs() > 1e-6);
        assert_eq!(s[[0, 0]].im, 0.0);
    }

    #[test]
    fn hamiltonian_assembly() {
        let basis = basis(Ecs::none());
        let blocks = RadialBlocks::new(&basis);
        let V = blocks.potential(&basis, &Potential::Coulomb { z: 1.0 });
        V.iter().zip(blocks.get_inv_r())
            .for_each(|(v, w)| assert_abs_diff_eq!((v + w).norm(), 0.0, epsilon = 1e-14));
        let H0 = blocks.hamiltonian(0, [&V]);
        assert_eq!(H0, blocks.get_kinetic() + &V);
        let H1 = blocks.hamiltonian(1, []);
        let expected = blocks.get_kinetic() + blocks.get_inv_r2();
        H1.iter().zip(&expected)
            .for_each(|(h, e)| assert_abs_diff_eq!((h - e).norm(), 0.0, epsilon = 1e-12));
    }

    #[test]
    fn hydrogen_ground_state_energy() {
        // the Rayleigh quotient of the basis' best approximation to
        // u(r) = 2 r exp(-r) should sit just above -1/2
        let basis = basis(Ecs::none());
        let blocks = RadialBlocks::new(&basis);
        let V = blocks.potential(&basis, &Potential::Coulomb { z: 1.0 });
        let H = blocks.hamiltonian(0, [&V]);
        let S = blocks.get_overlap();
        // interpolate at Greville abscissae; accurate enough for a
        // second-order estimate of the energy
        let order = basis.get_order();
        let knots = basis.get_knots();
        let active = basis.active_range();
        let n = active.len();
        let xi: Vec<f64>
            = active.clone()
            .map(|i| {
                knots.slice(nd::s![i + 1..i + order]).sum().re
                    / (order - 1) as f64
            })
            .collect();
        let A: nd::Array2<f64>
            = nd::Array2::from_shape_fn((n, n), |(k, j)| {
                basis.bspline(xi[k], active.start + j, 0).re
            });
        let b: nd::Array1<f64> = xi.iter().map(|r| 2.0 * r * (-r).exp()).collect();
        let c = A.solve_into(b).unwrap().mapv(C64::from);
        let num = c.dot(&H.dot(&c));
        let den = c.dot(&S.dot(&c));
        let energy = (num / den).re;
        assert!(energy >= -0.5 - 1e-8);
        assert_abs_diff_eq!(energy, -0.5, epsilon = 1e-4);
    }
}
