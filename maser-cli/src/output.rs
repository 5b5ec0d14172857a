//! Light-curve CSV output and the per-hemisphere summary

use std::io::{self, Write};

use log::warn;
use maser_analysis::{
    events, frequency_grid, lomb_scargle, top_peaks, AnalysisError, DutyCycle, TopPeaks,
    DEFAULT_PEAK_COUNT,
};
use maser_core::{Hemisphere, Visibility};
use serde::Serialize;

use crate::args::PeriodogramArgs;

/// Write `time,north,south` rows with 0/1 visibility flags
pub fn write_lightcurve_csv<W: Write>(
    mut writer: W,
    times: &[f64],
    visibility: &Visibility,
) -> io::Result<()> {
    writeln!(writer, "time,north,south")?;
    for (i, &t) in times.iter().enumerate() {
        let sample = visibility.sample(i);
        writeln!(
            writer,
            "{:.6},{},{}",
            t,
            u8::from(sample.north),
            u8::from(sample.south)
        )?;
    }
    writer.flush()
}

/// Summary statistics of one hemisphere's light curve
#[derive(Debug, Clone, Serialize)]
pub struct HemisphereSummary {
    pub hemisphere: String,
    pub duty_cycle: DutyCycle,
    /// Number of complete visible runs
    pub events: usize,
    /// Mean duration of complete runs in days, absent without events
    pub mean_event_duration: Option<f64>,
    /// Most prominent periodogram peaks, when requested and the series varies
    pub periodogram_peaks: Option<TopPeaks>,
}

/// Summary of a light curve for printing or JSON output
#[derive(Debug, Clone, Serialize)]
pub struct LightCurveSummary {
    pub orbital_period_days: f64,
    pub samples: usize,
    pub hemispheres: Vec<HemisphereSummary>,
}

fn periodogram_peaks(
    times: &[f64],
    series: &[f64],
    args: &PeriodogramArgs,
) -> Result<TopPeaks, AnalysisError> {
    let (min, max) = args.frequency_range;
    let freqs = frequency_grid(min, max, args.frequency_bins)?;
    let power = lomb_scargle(times, series, &freqs)?;
    top_peaks(&freqs, &power, args.min_prominence, DEFAULT_PEAK_COUNT)
}

/// Summarize both hemispheres of a light curve
///
/// # Arguments
/// * `times` - Sample times (days)
/// * `visibility` - Visibility at each sample time
/// * `orbital_period` - Planet orbital period (days)
/// * `periodogram` - Periodogram settings, skipped unless enabled
pub fn summarize(
    times: &[f64],
    visibility: &Visibility,
    orbital_period: f64,
    periodogram: &PeriodogramArgs,
) -> Result<LightCurveSummary, AnalysisError> {
    let mut hemispheres = Vec::with_capacity(Hemisphere::ALL.len());

    for hemisphere in Hemisphere::ALL {
        let series = visibility.hemisphere(hemisphere);
        let found = events(times, series)?;

        let mean_event_duration = if found.is_empty() {
            None
        } else {
            Some(found.iter().map(|e| e.duration).sum::<f64>() / found.len() as f64)
        };

        let periodogram_peaks = if periodogram.periodogram {
            match periodogram_peaks(times, &visibility.as_f64(hemisphere), periodogram) {
                Ok(peaks) => Some(peaks),
                Err(AnalysisError::ConstantSeries) => {
                    warn!("{hemisphere} visibility is constant, skipping periodogram");
                    None
                }
                Err(e) => return Err(e),
            }
        } else {
            None
        };

        hemispheres.push(HemisphereSummary {
            hemisphere: hemisphere.to_string(),
            duty_cycle: DutyCycle::from_series(series),
            events: found.len(),
            mean_event_duration,
            periodogram_peaks,
        });
    }

    Ok(LightCurveSummary {
        orbital_period_days: orbital_period,
        samples: times.len(),
        hemispheres,
    })
}
