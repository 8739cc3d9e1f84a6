//! Configuration types for loading simulation batches from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! batch of independent runs. A batch consists of:
//!
//! - [`BatchConfig`] – top-level wrapper: base seed, output directory, runs
//! - [`RunConfig`]   – everything one run needs (timestep, softening, N, ...)
//! - [`BodyConfig`]  – optional explicit initial state for a single body
//!
//! # YAML format
//! An example batch matching these types:
//!
//! ```yaml
//! seed: 17                  # base seed, used by runs without their own
//! output_dir: "output"      # frames land in output/<run_id>/
//!
//! runs:
//!   - run_id: "n100"
//!     timestep: 0.01        # dt > 0
//!     softening: 0.1        # epsilon >= 0, acceleration only
//!     length: 10.0          # simulated duration > 0
//!     n: 100                # body count >= 1
//!     total_mass: 20.0      # split evenly across bodies
//!     render_every: 5       # optional, default 1
//!     trail_limit: 10       # optional, bounds position history
//!
//!   - run_id: "binary"
//!     timestep: 0.001
//!     softening: 0.0
//!     length: 4.5
//!     n: 2
//!     total_mass: 2.0       # must equal the sum of the listed masses
//!     bodies:               # optional, replaces the random draw
//!       - x: [ -0.5, 0.0, 0.0 ]
//!         v: [  0.0, -0.7071, 0.0 ]
//!         m: 1.0
//!       - x: [  0.5, 0.0, 0.0 ]
//!         v: [  0.0, 0.7071, 0.0 ]
//!         m: 1.0
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::SimError;

fn default_render_every() -> usize {
    1
}

/// Longest run accepted, in steps
pub const MAX_TIMESTEPS: usize = u32::MAX as usize;

/// Relative tolerance when comparing listed body masses with `total_mass`
const MASS_TOLERANCE: f64 = 1e-9;

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub x: Vec<f64>, // initial position, exactly 3 components
    pub v: Vec<f64>, // initial velocity, exactly 3 components
    pub m: f64,      // mass
}

/// One independent simulation run
#[derive(Deserialize, Debug, Clone)]
pub struct RunConfig {
    pub run_id: String,   // output namespace only, a plain directory name
    pub timestep: f64,    // dt
    pub softening: f64,   // epsilon, added as eps^2 to squared distances
    pub length: f64,      // simulated duration t_end
    pub n: usize,         // body count
    pub total_mass: f64,  // mass split evenly across the n bodies
    #[serde(default)]
    pub seed: Option<u64>, // overrides the batch seed
    #[serde(default = "default_render_every")]
    pub render_every: usize, // hand every k-th step to the renderer
    #[serde(default)]
    pub trail_limit: Option<usize>, // keep at most this many past position snapshots
    #[serde(default)]
    pub bodies: Option<Vec<BodyConfig>>, // explicit initial state instead of a random draw
}

impl RunConfig {
    /// Minimal random-start run, the rest left at defaults
    pub fn new(run_id: impl Into<String>, timestep: f64, softening: f64, length: f64, n: usize, total_mass: f64) -> Self {
        Self {
            run_id: run_id.into(),
            timestep,
            softening,
            length,
            n,
            total_mass,
            seed: None,
            render_every: default_render_every(),
            trail_limit: None,
            bodies: None,
        }
    }

    /// Check every precondition the integrator relies on.
    /// Called by `Simulation::new` before anything is allocated.
    pub fn validate(&self) -> Result<(), SimError> {
        self.validate_run_id()?;
        if self.n < 1 {
            return Err(SimError::invalid(format!("run '{}': n must be >= 1", self.run_id)));
        }
        if !(self.timestep.is_finite() && self.timestep > 0.0) {
            return Err(SimError::invalid(format!("run '{}': timestep must be > 0, got {}", self.run_id, self.timestep)));
        }
        if !(self.length.is_finite() && self.length > 0.0) {
            return Err(SimError::invalid(format!("run '{}': length must be > 0, got {}", self.run_id, self.length)));
        }
        if !(self.softening.is_finite() && self.softening >= 0.0) {
            return Err(SimError::invalid(format!("run '{}': softening must be >= 0, got {}", self.run_id, self.softening)));
        }
        if !(self.total_mass.is_finite() && self.total_mass > 0.0) {
            return Err(SimError::invalid(format!("run '{}': total_mass must be > 0, got {}", self.run_id, self.total_mass)));
        }
        let steps = (self.length / self.timestep).ceil();
        if !(steps.is_finite() && steps <= MAX_TIMESTEPS as f64) {
            return Err(SimError::invalid(format!(
                "run '{}': length / timestep gives {:e} steps, at most {} allowed", self.run_id, steps, MAX_TIMESTEPS
            )));
        }
        if self.render_every == 0 {
            return Err(SimError::invalid(format!("run '{}': render_every must be >= 1", self.run_id)));
        }
        if let Some(bodies) = &self.bodies {
            if bodies.len() != self.n {
                return Err(SimError::invalid(format!(
                    "run '{}': n = {} but {} bodies listed", self.run_id, self.n, bodies.len()
                )));
            }
            for (i, b) in bodies.iter().enumerate() {
                if b.x.len() != 3 || b.v.len() != 3 {
                    return Err(SimError::invalid(format!(
                        "run '{}': body {} needs 3 position and 3 velocity components", self.run_id, i
                    )));
                }
                if !(b.m.is_finite() && b.m > 0.0) {
                    return Err(SimError::invalid(format!("run '{}': body {} has non-positive mass", self.run_id, i)));
                }
            }
            let listed: f64 = bodies.iter().map(|b| b.m).sum();
            if (listed - self.total_mass).abs() > MASS_TOLERANCE * self.total_mass {
                return Err(SimError::invalid(format!(
                    "run '{}': listed masses sum to {} but total_mass is {}", self.run_id, listed, self.total_mass
                )));
            }
        }
        Ok(())
    }

    /// `run_id` names a single directory under the output root
    fn validate_run_id(&self) -> Result<(), SimError> {
        let id = self.run_id.as_str();
        let bad = id.is_empty()
            || id == "."
            || id == ".."
            || id.contains(['/', '\\', ':'])
            || Path::new(id).is_absolute();
        if bad {
            return Err(SimError::invalid(format!("run_id '{}' must be a plain directory name", id)));
        }
        Ok(())
    }
}

/// Top-level batch configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct BatchConfig {
    pub seed: u64,            // deterministic seed to make runs reproducible
    pub output_dir: PathBuf,  // root for every run's frame directory
    pub runs: Vec<RunConfig>, // independent runs, executed in parallel
}

impl BatchConfig {
    /// Seed used by `run`: its own if given, otherwise the batch seed
    pub fn seed_for(&self, run: &RunConfig) -> u64 {
        run.seed.unwrap_or(self.seed)
    }
}

/// Read a [`BatchConfig`] from a YAML file
pub fn load_batch(path: &Path) -> Result<BatchConfig, SimError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let batch: BatchConfig = serde_yaml::from_reader(reader)?;
    Ok(batch)
}
