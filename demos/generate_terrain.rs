//! Generate a random terrain height field as an `x y z` point file
//!
//! The terrain is a sum of Gaussian bumps with seeded random centers,
//! widths and amplitudes, sampled on a row-major grid.

use anyhow::{ensure, Context, Result};
use clap::Parser;
use gridshade_core::GridPoint;
use nalgebra::Point2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "generate_terrain", about = "Write a random terrain grid to an xyz file")]
struct Args {
    /// Output path (.xyz, .txt or .asc)
    output: PathBuf,

    #[arg(long, default_value_t = 50)]
    rows: usize,

    #[arg(long, default_value_t = 50)]
    cols: usize,

    /// Distance between neighbouring samples
    #[arg(long, default_value_t = 1.0)]
    spacing: f64,

    /// Number of Gaussian bumps
    #[arg(long, default_value_t = 8)]
    bumps: usize,

    #[arg(long, default_value_t = 42)]
    seed: u64,
}

struct Bump {
    center: Point2<f64>,
    sigma: f64,
    amplitude: f64,
}

impl Bump {
    fn height_at(&self, point: &Point2<f64>) -> f64 {
        let distance_sq = (point - self.center).norm_squared();
        self.amplitude * (-distance_sq / (2.0 * self.sigma * self.sigma)).exp()
    }
}

fn random_bumps(rng: &mut StdRng, count: usize, extent: Point2<f64>) -> Vec<Bump> {
    let reach = extent.x.max(extent.y).max(1.0);
    (0..count)
        .map(|_| Bump {
            center: Point2::new(rng.gen_range(0.0..=extent.x), rng.gen_range(0.0..=extent.y)),
            sigma: rng.gen_range(0.05..0.25) * reach,
            amplitude: rng.gen_range(-0.3..1.0) * reach * 0.2,
        })
        .collect()
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    ensure!(args.rows >= 2 && args.cols >= 2, "terrain needs at least 2x2 samples");
    ensure!(args.spacing > 0.0, "spacing must be positive");

    let mut rng = StdRng::seed_from_u64(args.seed);
    let extent = Point2::new(
        (args.cols - 1) as f64 * args.spacing,
        (args.rows - 1) as f64 * args.spacing,
    );
    let bumps = random_bumps(&mut rng, args.bumps, extent);

    let points: Vec<GridPoint> = (0..args.rows)
        .flat_map(|i| (0..args.cols).map(move |j| (i, j)))
        .map(|(i, j)| {
            let sample = Point2::new(j as f64 * args.spacing, i as f64 * args.spacing);
            let z: f64 = bumps.iter().map(|bump| bump.height_at(&sample)).sum();
            GridPoint::new(sample.x, sample.y, z)
        })
        .collect();

    gridshade_io::write_points(&points, &args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    log::info!("wrote {} points to {}", points.len(), args.output.display());
    println!(
        "wrote {}x{} terrain ({} points) to {}",
        args.rows,
        args.cols,
        points.len(),
        args.output.display()
    );
    Ok(())
}
