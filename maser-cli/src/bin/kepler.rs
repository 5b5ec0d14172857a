//! Convert between orbital distance and orbital period
//!
//! Distances are in stellar radii and periods in days, the units the
//! visibility model takes.

use anyhow::{bail, Result};
use clap::Parser;
use maser_core::kepler::{orbital_distance, orbital_period};
use maser_core::PhysicalConstants;

#[derive(Parser, Debug)]
#[command(
    name = "Kepler",
    about = "Converts orbital distance to period or period to distance",
    long_about = None
)]
struct Args {
    /// Stellar mass in solar masses
    #[arg(long, default_value_t = 0.2)]
    mass: f64,

    /// Stellar radius in solar radii
    #[arg(long, default_value_t = 0.3)]
    radius: f64,

    /// Orbital distance in stellar radii
    #[arg(long, conflicts_with = "period")]
    distance: Option<f64>,

    /// Orbital period in days
    #[arg(long)]
    period: Option<f64>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    if !(args.mass > 0.0 && args.radius > 0.0) {
        bail!("Mass and radius must be positive");
    }

    let constants = PhysicalConstants::CGS;
    match (args.distance, args.period) {
        (Some(distance), None) => {
            let period = orbital_period(distance, args.mass, args.radius, &constants);
            println!("{distance} R* -> {period:.6} d");
        }
        (None, Some(period)) => {
            let distance = orbital_distance(period, args.mass, args.radius, &constants);
            println!("{period} d -> {distance:.6} R*");
        }
        _ => bail!("Give exactly one of --distance or --period"),
    }

    Ok(())
}
