use clap::{Parser, ValueEnum};
use maser_core::SystemParams;

/// Parse a frequency range in format "min,max"
fn parse_frequency_range(s: &str) -> Result<(f64, f64), String> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 2 {
        return Err("Frequency range must be in format 'min,max'".to_string());
    }

    let min = parts[0]
        .trim()
        .parse::<f64>()
        .map_err(|_| "Invalid minimum frequency".to_string())?;
    let max = parts[1]
        .trim()
        .parse::<f64>()
        .map_err(|_| "Invalid maximum frequency".to_string())?;

    if !(min > 0.0 && max > min) {
        return Err(format!("Need 0 < min < max, got {min},{max}"));
    }

    Ok((min, max))
}

/// Physical parameters of the star-planet system
///
/// Defaults describe a rapidly rotating M dwarf with a close-in planet.
#[derive(Parser, Debug, Clone)]
pub struct SystemArgs {
    /// Stellar mass in solar masses
    #[arg(long, default_value_t = 0.2)]
    pub mass: f64,

    /// Stellar radius in solar radii
    #[arg(long, default_value_t = 0.3)]
    pub radius: f64,

    /// Stellar rotation period in days
    #[arg(long, default_value_t = 0.8)]
    pub rotation_period: f64,

    /// Stellar inclination in degrees
    #[arg(long, default_value_t = 67.0)]
    pub stellar_inclination: f64,

    /// Polar magnetic field strength in Gauss
    #[arg(long, default_value_t = 1000.0)]
    pub polar_field: f64,

    /// Magnetic obliquity in degrees
    #[arg(long, default_value_t = 34.0)]
    pub obliquity: f64,

    /// Stellar rotation phase at t = 0 in cycles
    #[arg(long, default_value_t = 0.1)]
    pub rotation_phase: f64,

    /// Orbital distance in stellar radii
    #[arg(long, default_value_t = 5.0)]
    pub distance: f64,

    /// Orbital inclination in degrees
    #[arg(long, default_value_t = 56.0)]
    pub orbital_inclination: f64,

    /// Projected spin-orbit angle in degrees
    #[arg(long, default_value_t = 23.0, allow_hyphen_values = true)]
    pub spin_orbit_angle: f64,

    /// Orbital phase at t = 0 in cycles
    #[arg(long, default_value_t = 0.6)]
    pub orbital_phase: f64,

    /// Observing frequency in MHz
    #[arg(long, default_value_t = 100.0)]
    pub frequency: f64,

    /// Emission cone opening angle in degrees
    #[arg(long, default_value_t = 75.0)]
    pub cone_opening: f64,

    /// Emission cone thickness in degrees
    #[arg(long, default_value_t = 5.0)]
    pub cone_thickness: f64,
}

impl SystemArgs {
    pub fn to_params(&self) -> SystemParams {
        SystemParams {
            stellar_mass: self.mass,
            stellar_radius: self.radius,
            rotation_period: self.rotation_period,
            stellar_inclination: self.stellar_inclination,
            polar_field: self.polar_field,
            obliquity: self.obliquity,
            rotation_phase: self.rotation_phase,
            orbital_distance: self.distance,
            orbital_inclination: self.orbital_inclination,
            spin_orbit_angle: self.spin_orbit_angle,
            orbital_phase: self.orbital_phase,
            frequency: self.frequency,
            cone_opening: self.cone_opening,
            cone_thickness: self.cone_thickness,
        }
    }
}

/// Uniform time sampling of the light curve
#[derive(Parser, Debug, Clone)]
pub struct TimeGridArgs {
    /// First sample time in days
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub start: f64,

    /// Span covered by the samples in days
    #[arg(long, default_value_t = 40.0)]
    pub duration: f64,

    /// Number of samples, endpoints included
    #[arg(long, default_value_t = 40_000)]
    pub samples: usize,
}

impl TimeGridArgs {
    /// Evenly spaced sample times from `start` to `start + duration`
    pub fn times(&self) -> Vec<f64> {
        match self.samples {
            0 => Vec::new(),
            1 => vec![self.start],
            n => {
                let step = self.duration / (n - 1) as f64;
                (0..n).map(|i| self.start + step * i as f64).collect()
            }
        }
    }
}

/// How the visibility series is evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EvaluationMode {
    /// One sample at a time on the calling thread
    Sequential,
    /// Chunks of samples on the rayon thread pool
    Parallel,
    /// Whole-array masked stages
    Masked,
}

impl std::fmt::Display for EvaluationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EvaluationMode::Sequential => write!(f, "sequential"),
            EvaluationMode::Parallel => write!(f, "parallel"),
            EvaluationMode::Masked => write!(f, "masked"),
        }
    }
}

/// Optional Lomb-Scargle search of the visibility series
#[derive(Parser, Debug, Clone)]
pub struct PeriodogramArgs {
    /// Compute a periodogram of each hemisphere
    #[arg(long, default_value_t = false)]
    pub periodogram: bool,

    /// Frequency search range in cycles per day (format: "min,max")
    #[arg(long, default_value = "0.05,5.0", value_parser = parse_frequency_range)]
    pub frequency_range: (f64, f64),

    /// Number of trial frequencies
    #[arg(long, default_value_t = 5000)]
    pub frequency_bins: usize,

    /// Minimum peak prominence reported
    #[arg(long, default_value_t = maser_analysis::DEFAULT_MIN_PROMINENCE)]
    pub min_prominence: f64,
}
