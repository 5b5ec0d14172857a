//! Light curve of planet-induced maser emission
//!
//! Evaluates north and south visibility over a uniform time grid, prints a
//! per-hemisphere summary and optionally writes the light curve to CSV and
//! the summary to JSON.
//!
//! Usage:
//! ```
//! cargo run --bin maser_lightcurve -- [OPTIONS]
//! ```
//!
//! See --help for detailed options.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use maser_cli::args::{EvaluationMode, PeriodogramArgs, SystemArgs, TimeGridArgs};
use maser_cli::output::{summarize, write_lightcurve_csv};
use maser_core::{evaluate_masked, evaluate_par, MaserModel};

/// Command line arguments for light-curve generation
#[derive(Parser, Debug)]
#[command(
    name = "Maser Light Curve",
    about = "Computes when planet-induced cyclotron maser emission is visible",
    long_about = None
)]
struct Args {
    #[command(flatten)]
    system: SystemArgs,

    #[command(flatten)]
    grid: TimeGridArgs,

    #[command(flatten)]
    periodogram: PeriodogramArgs,

    /// Evaluation strategy
    #[arg(long, default_value_t = EvaluationMode::Parallel)]
    mode: EvaluationMode,

    /// Output CSV file for the light curve
    #[arg(long)]
    output: Option<PathBuf>,

    /// Output JSON file for the summary
    #[arg(long)]
    summary_json: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let params = args.system.to_params();
    params.validate().context("Invalid system parameters")?;

    let model = MaserModel::with_defaults(params);
    let times = args.grid.times();

    info!(
        "Orbital period {:.4} d, {} samples over {} d ({} evaluation)",
        model.orbital_period(),
        times.len(),
        args.grid.duration,
        args.mode
    );
    if !model.emission_possible() {
        info!(
            "{} MHz is above the polar cyclotron frequency {} MHz, nothing can be visible",
            params.frequency,
            params.max_frequency()
        );
    }

    let started = Instant::now();
    let visibility = match args.mode {
        EvaluationMode::Sequential => model.evaluate(&times),
        EvaluationMode::Parallel => evaluate_par(&model, &times, None),
        EvaluationMode::Masked => evaluate_masked(&model, &times).to_visibility(),
    };
    info!("Evaluated in {:.3?}", started.elapsed());

    if let Some(path) = &args.output {
        let file = File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        write_lightcurve_csv(BufWriter::new(file), &times, &visibility)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Light curve written to {}", path.display());
    }

    let summary = summarize(&times, &visibility, model.orbital_period(), &args.periodogram)
        .context("Failed to analyse light curve")?;

    println!("Maser Light Curve");
    println!("=================");
    println!("Orbital period: {:.4} d", summary.orbital_period_days);
    println!("Samples: {}", summary.samples);
    for hemisphere in &summary.hemispheres {
        println!();
        println!("{} hemisphere:", hemisphere.hemisphere);
        println!("  Visible: {}", hemisphere.duty_cycle);
        println!("  Complete events: {}", hemisphere.events);
        if let Some(duration) = hemisphere.mean_event_duration {
            println!("  Mean event duration: {:.2} h", duration * 24.0);
        }
        if let Some(peaks) = &hemisphere.periodogram_peaks {
            for (frequency, prominence) in peaks.positions.iter().zip(&peaks.prominences) {
                if *frequency > 0.0 {
                    println!(
                        "  Peak: {:.4} c/d (period {:.4} d), prominence {:.3}",
                        frequency,
                        1.0 / frequency,
                        prominence
                    );
                }
            }
        }
    }

    if let Some(path) = &args.summary_json {
        let file = File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &summary)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Summary written to {}", path.display());
    }

    Ok(())
}
