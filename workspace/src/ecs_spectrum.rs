#![allow(non_snake_case)]

use anyhow::Result;
use ndarray as nd;
use ndarray_linalg::{ Eig, Inverse };
use num_complex::Complex64 as C64;
use ecspline::{
    bspline::BSpline,
    ecs::Ecs,
    radial::{ Potential, RadialBlocks },
    sequence::Sequence,
};

const ORDER: usize = 7;
const NODES: usize = 151;
const RMAX: f64 = 120.0;
const THETA: f64 = 0.35;

fn main() -> Result<()> {
    let mut basis = BSpline::new(
        ORDER, NODES, 0.0, RMAX,
        Sequence::ParabolicLinear(10.0),
        Ecs { r0: 0.7, theta: THETA },
    )?;
    basis.set_skip_first(true);
    basis.set_skip_last(true);
    let contour = *basis.get_contour();
    println!(
        "{} B-splines; contour rotated by {} beyond r0 = {:.6}",
        basis.get_num_bsplines(), contour.theta(), contour.r0(),
    );

    let blocks = RadialBlocks::new(&basis);
    let potentials: Vec<nd::Array2<C64>>
        = [
            Potential::Coulomb { z: 1.0 },
            Potential::Exponential { z: 0.5, decay: 1.0 },
        ]
        .iter()
        .map(|pot| blocks.potential(&basis, pot))
        .collect();
    let H = blocks.hamiltonian(0, &potentials);
    let (e, _) = blocks.get_overlap().inv()?.dot(&H).eig()?;
    let mut e: Vec<C64> = e.to_vec();
    e.sort_by(|a, b| a.re.total_cmp(&b.re));

    // bound states stay on the real axis; the continuum rotates to arg -2θ
    println!("{:>22} {:>22} {:>10}", "Re E", "Im E", "arg E");
    for ek in e.iter().filter(|ek| ek.re < 5.0) {
        println!("{:+22.12e} {:+22.12e} {:+10.4}", ek.re, ek.im, ek.arg());
    }
    let rotated
        = e.iter()
        .filter(|ek| ek.re > 0.0 && (ek.arg() + 2.0 * THETA).abs() < 0.05)
        .count();
    println!("{} of {} eigenvalues near arg = -2θ", rotated, e.len());
    Ok(())
}
