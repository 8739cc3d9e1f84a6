//! Numerical and physical parameters for a run
//!
//! `Parameters` holds the fixed settings the integrator reads every step:
//! - step size and end time (`dt`, `t_end`),
//! - softening and gravitational constant (`eps`, `G`),
//! - body count and total mass used at initialization

use crate::configuration::config::RunConfig;

/// Gravitational constant, fixed for this system
pub const GRAVITY: f64 = 1.0;

#[allow(non_snake_case)]
#[derive(Debug, Clone)]
pub struct Parameters {
    pub dt: f64, // step size
    pub t_end: f64, // time end
    pub eps: f64, // softening length
    pub G: f64, // gravitational constant
    pub n: usize, // body count
    pub total_mass: f64, // summed mass of all bodies
}

impl Parameters {
    /// Assumes `cfg` has already been validated
    pub fn from_config(cfg: &RunConfig) -> Self {
        Self {
            dt: cfg.timestep,
            t_end: cfg.length,
            eps: cfg.softening,
            G: GRAVITY,
            n: cfg.n,
            total_mass: cfg.total_mass,
        }
    }

    /// ceil(t_end / dt), the exact number of steps a run performs
    pub fn num_timesteps(&self) -> usize {
        (self.t_end / self.dt).ceil() as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_count_rounds_up() {
        let p = Parameters::from_config(&RunConfig::new("r", 0.01, 0.1, 20.0, 3, 1.0));
        assert_eq!(p.num_timesteps(), 2000);

        let p = Parameters::from_config(&RunConfig::new("r", 0.3, 0.1, 1.0, 3, 1.0));
        assert_eq!(p.num_timesteps(), 4);
        assert_eq!(p.G, GRAVITY);
    }
}
