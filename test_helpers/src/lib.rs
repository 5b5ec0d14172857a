//! Shared fixtures for maser workspace tests
//!
//! Reference parameter sets, time grids and a scratch directory for test
//! artifacts such as light-curve CSV files.

use std::env;
use std::path::{Path, PathBuf};

use maser_core::SystemParams;
use once_cell::sync::Lazy;

/// Error type for test helper operations
#[derive(thiserror::Error, Debug)]
pub enum TestHelperError {
    #[error("Failed to find workspace root: {0}")]
    WorkspaceRootNotFound(String),
}

/// AU Mic with planet b at 10 stellar radii, observed at 10 MHz
///
/// Tilted dipole (β = 20°) on an edge-on star with a cone of 75° ± 2.5°.
pub fn au_mic_params() -> SystemParams {
    SystemParams {
        stellar_mass: 0.5,
        stellar_radius: 0.75,
        rotation_period: 4.86,
        stellar_inclination: 90.0,
        polar_field: 430.0,
        obliquity: 20.0,
        rotation_phase: 0.2,
        orbital_distance: 10.0,
        orbital_inclination: 89.18,
        spin_orbit_angle: 0.0,
        orbital_phase: 0.6,
        frequency: 10.0,
        cone_opening: 75.0,
        cone_thickness: 5.0,
    }
}

/// A compact M dwarf with a close-in planet, observed at 100 MHz
pub fn m_dwarf_params() -> SystemParams {
    SystemParams {
        stellar_mass: 0.2,
        stellar_radius: 0.3,
        rotation_period: 0.8,
        stellar_inclination: 67.0,
        polar_field: 1000.0,
        obliquity: 34.0,
        rotation_phase: 0.1,
        orbital_distance: 5.0,
        orbital_inclination: 56.0,
        spin_orbit_angle: 23.0,
        orbital_phase: 0.6,
        frequency: 100.0,
        cone_opening: 75.0,
        cone_thickness: 5.0,
    }
}

/// `count` evenly spaced times from `start` to `end` inclusive
pub fn uniform_times(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            (0..count).map(|i| start + step * i as f64).collect()
        }
    }
}

/// Walk up from the current directory to the Cargo workspace manifest
pub fn find_workspace_root() -> Result<PathBuf, TestHelperError> {
    let mut dir = env::current_dir().map_err(|e| {
        TestHelperError::WorkspaceRootNotFound(format!("Failed to get current directory: {e}"))
    })?;

    loop {
        let manifest = dir.join("Cargo.toml");
        if manifest.exists() {
            let content = std::fs::read_to_string(&manifest).map_err(|e| {
                TestHelperError::WorkspaceRootNotFound(format!(
                    "Failed to read {}: {e}",
                    manifest.display()
                ))
            })?;
            if content.contains("[workspace]") {
                return Ok(dir);
            }
        }

        if !dir.pop() {
            return Err(TestHelperError::WorkspaceRootNotFound(
                "No [workspace] manifest above the current directory".to_string(),
            ));
        }
    }
}

static ARTIFACT_DIR: Lazy<PathBuf> = Lazy::new(|| {
    let root = find_workspace_root().expect("Failed to find workspace root");
    let dir = root.join("test_output");
    std::fs::create_dir_all(&dir).expect("Failed to create test_output directory");
    dir
});

/// Path of a test artifact inside `<workspace>/test_output`
pub fn output_path<P: AsRef<Path>>(path: P) -> PathBuf {
    ARTIFACT_DIR.join(path)
}
