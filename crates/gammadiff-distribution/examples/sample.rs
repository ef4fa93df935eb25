//! Evaluate the oracle distribution and time each operation.
//!
//! Run with `RUST_LOG=gammadiff_distribution=debug` to see the walk events.

use gammadiff_distribution::{GammaDifference, DEFAULT_SEGMENTS};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let (alpha_1, beta_1, alpha_2, beta_2) = (50, 10_000.0, 100, 20_000.0);
    println!("alpha_1, beta_1, alpha_2, beta_2 = {alpha_1}, {beta_1}, {alpha_2}, {beta_2}");

    let dist = GammaDifference::new(alpha_1, beta_1, alpha_2, beta_2)?;
    let moments = *dist.moments();
    println!(
        "center = {:e}, standard_err = {:e}",
        moments.center, moments.standard_err
    );

    let start = Instant::now();
    let pdf = dist.pdf(moments.center)?;
    println!("pdf: {pdf}");
    println!("--- {:.3} seconds ---", start.elapsed().as_secs_f64());

    let z = moments.offset(0.5);

    let start = Instant::now();
    let cdf = dist.cdf(z)?;
    println!("cdf (quadrature): {cdf}");
    println!("--- {:.3} seconds ---", start.elapsed().as_secs_f64());

    let start = Instant::now();
    let cdf = dist.cdf_adaptive(z)?;
    println!("cdf (adaptive): {cdf}");
    println!("--- {:.3} seconds ---", start.elapsed().as_secs_f64());

    let start = Instant::now();
    let table = dist.cdf_segment(DEFAULT_SEGMENTS)?;
    println!("{:?}", table.as_slice());
    println!("--- {:.3} seconds ---", start.elapsed().as_secs_f64());

    Ok(())
}
