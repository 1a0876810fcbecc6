#![allow(non_snake_case)]

use std::{ env, fs };
use anyhow::{ bail, Context, Result };
use ndarray as nd;
use num_complex::Complex64 as C64;
use ecspline::config::BasisConfig;

const NUM_POINTS: usize = 500;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        bail!("usage: {} <config.json> [derivative order]", args[0]);
    }
    let infile = fs::read_to_string(&args[1])
        .with_context(|| format!("couldn't read {}", args[1]))?;
    let config: BasisConfig = serde_json::from_str(&infile)
        .context("malformed basis config")?;
    let dn: usize = args.get(2).map(|s| s.parse()).transpose()?.unwrap_or(0);

    let basis = config.build()?;
    let grid = basis.get_grid();
    let x: nd::Array1<f64>
        = nd::Array1::linspace(grid[0], grid[grid.len() - 1], NUM_POINTS);
    let contour = basis.get_contour();
    let table: nd::Array2<C64> = basis.sample_table(&x, dn);

    // columns: x, Re R(x), Im R(x), then Re/Im of each active B-spline
    for (k, xk) in x.iter().enumerate() {
        let R = contour.R(*xk);
        let mut line = format!("{:+.12e}\t{:+.12e}\t{:+.12e}", xk, R.re, R.im);
        table.column(k).iter()
            .for_each(|b| line.push_str(&format!("\t{:+.12e}\t{:+.12e}", b.re, b.im)));
        println!("{}", line);
    }
    Ok(())
}
