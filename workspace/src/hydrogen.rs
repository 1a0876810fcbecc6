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

const Z: f64 = 1.0;
const ORDER: usize = 7;
const NODES: usize = 121;
const RMAX: f64 = 100.0;
const NUM_SHOW: usize = 6;

// eigenvalues of the generalized problem H c = E S c, sorted by real part
fn spectrum(H: &nd::Array2<C64>, S: &nd::Array2<C64>) -> Result<Vec<C64>> {
    let (e, _) = S.inv()?.dot(H).eig()?;
    let mut e: Vec<C64> = e.to_vec();
    e.sort_by(|a, b| a.re.total_cmp(&b.re));
    Ok(e)
}

fn main() -> Result<()> {
    let mut basis = BSpline::new(
        ORDER, NODES, 0.0, RMAX, Sequence::Exponential(4.0), Ecs::none())?;
    basis.set_skip_first(true);
    basis.set_skip_last(true);
    let blocks = RadialBlocks::new(&basis);
    let V = blocks.potential(&basis, &Potential::Coulomb { z: Z });
    println!(
        "{} B-splines of order {} on [0, {}]",
        basis.get_num_bsplines(), ORDER, RMAX,
    );

    for l in 0..3_usize {
        let H = blocks.hamiltonian(l, [&V]);
        let e = spectrum(&H, blocks.get_overlap())?;
        println!("l = {}", l);
        e.iter().take(NUM_SHOW).enumerate()
            .for_each(|(k, ek)| {
                let n = (l + 1 + k) as f64;
                let exact = -Z * Z / (2.0 * n * n);
                println!(
                    "  n = {:2}: E = {:+.12e} (exact {:+.12e}, err {:.2e})",
                    n, ek.re, exact, (ek.re - exact).abs(),
                );
            });
    }
    Ok(())
}
