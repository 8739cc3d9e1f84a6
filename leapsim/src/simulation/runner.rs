//! One complete simulation run
//!
//! `Simulation` owns the system, the force law, the carried acceleration and
//! the history buffers. It is built from a validated [`RunConfig`] and a
//! caller-owned RNG, then stepped strictly sequentially until the step
//! counter reaches `ceil(length / timestep)`.

use rand::Rng;

use crate::configuration::config::RunConfig;
use crate::error::SimError;
use crate::output::{FrameSink, Renderer, Snapshot, TRAIL_WINDOW};
use crate::simulation::energy::{compute_energies, Energies};
use crate::simulation::forces::{Acceleration, NewtonianGravity};
use crate::simulation::history::History;
use crate::simulation::integrator::leapfrog_step;
use crate::simulation::params::Parameters;
use crate::simulation::scenario::build_system;
use crate::simulation::states::{System3, NVec3};

/// Relative energy drift above which a finished run is logged as a warning
pub const DRIFT_WARN: f64 = 1e-2;

/// Outcome of a finished run
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub run_id: String,
    pub n: usize,
    pub steps: usize,
    pub initial_energy: f64,
    pub final_energy: f64,
}

impl RunSummary {
    /// |TE(end) - TE(0)| / |TE(0)|
    pub fn relative_drift(&self) -> f64 {
        relative_drift(self.initial_energy, self.final_energy)
    }
}

fn relative_drift(e0: f64, e: f64) -> f64 {
    if e0 == 0.0 {
        (e - e0).abs()
    } else {
        ((e - e0) / e0).abs()
    }
}

pub struct Simulation {
    run_id: String,
    parameters: Parameters,
    system: System3,
    forces: NewtonianGravity,
    accel: Vec<NVec3>,
    history: History,
    step: usize,
    num_timesteps: usize,
    render_every: usize,
}

impl Simulation {
    /// Validate `cfg`, draw the initial state and compute a_0 and (KE, PE)_0
    pub fn new<R: Rng + ?Sized>(cfg: &RunConfig, rng: &mut R) -> Result<Self, SimError> {
        cfg.validate()?;

        let parameters = Parameters::from_config(cfg);
        let system = build_system(cfg, rng);
        Ok(Self::from_system(cfg, parameters, system))
    }

    fn from_system(cfg: &RunConfig, parameters: Parameters, system: System3) -> Self {
        let forces = NewtonianGravity {
            G: parameters.G,
            eps: parameters.eps,
        };

        let mut accel = vec![NVec3::zeros(); system.len()];
        forces.acceleration(&system, &mut accel);

        let num_timesteps = parameters.num_timesteps();
        let mut history = History::new(num_timesteps + 1, cfg.trail_limit);
        let energies = Self::energies_of(&system, parameters.G);
        history.record(system.t, system.positions(), energies);

        Self {
            run_id: cfg.run_id.clone(),
            parameters,
            system,
            forces,
            accel,
            history,
            step: 0,
            num_timesteps,
            render_every: cfg.render_every,
        }
    }

    #[allow(non_snake_case)]
    fn energies_of(system: &System3, G: f64) -> Energies {
        compute_energies(&system.positions(), &system.velocities(), &system.masses(), G)
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn system(&self) -> &System3 {
        &self.system
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Acceleration at the current positions
    pub fn accelerations(&self) -> &[NVec3] {
        &self.accel
    }

    /// Steps taken so far
    pub fn step_index(&self) -> usize {
        self.step
    }

    pub fn num_timesteps(&self) -> usize {
        self.num_timesteps
    }

    pub fn is_finished(&self) -> bool {
        self.step >= self.num_timesteps
    }

    pub fn energies(&self) -> Energies {
        Self::energies_of(&self.system, self.parameters.G)
    }

    /// One kick-drift-kick step followed by energy / position bookkeeping
    pub fn step(&mut self) {
        leapfrog_step(&mut self.system, &mut self.accel, &self.forces, self.parameters.dt);
        self.step += 1;

        let energies = self.energies();
        self.history.record(self.system.t, self.system.positions(), energies);
    }

    /// View handed to a renderer for the current step
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            step: self.step,
            t: self.system.t,
            trail: self.history.trail(TRAIL_WINDOW),
            current: self.history.current_positions().unwrap_or(&[]),
            kinetic: self.history.kinetic(),
            potential: self.history.potential(),
            time: self.history.time(),
        }
    }

    fn should_render(&self) -> bool {
        self.step % self.render_every == 0 || self.is_finished()
    }

    /// Step to the end, rendering and persisting frames along the way
    pub fn run<Rd, S>(&mut self, renderer: &mut Rd, sink: &mut S) -> Result<RunSummary, SimError>
    where
        Rd: Renderer + ?Sized,
        S: FrameSink + ?Sized,
    {
        log::info!(
            "run '{}': {} bodies, {} steps (dt = {}, eps = {})",
            self.run_id, self.system.len(), self.num_timesteps, self.parameters.dt, self.parameters.eps
        );

        sink.begin(&self.run_id)?;
        while !self.is_finished() {
            self.step();

            if self.should_render() {
                let frame = renderer.render(&self.snapshot())?;
                sink.write(&self.run_id, &frame)?;
                log::debug!("run '{}': wrote frame {}", self.run_id, frame.step);
            }
        }
        sink.finish(&self.run_id)?;

        let summary = self.summary();
        let drift = summary.relative_drift();
        if drift > DRIFT_WARN {
            log::warn!("run '{}': relative energy drift {:.3e}", self.run_id, drift);
        }
        log::info!("run '{}': finished at t = {:.4}, drift {:.3e}", self.run_id, self.system.t, drift);

        Ok(summary)
    }

    /// Step to the end without producing output
    pub fn run_silent(&mut self) -> RunSummary {
        while !self.is_finished() {
            self.step();
        }
        self.summary()
    }

    pub fn summary(&self) -> RunSummary {
        let last = self.history.len().saturating_sub(1);
        RunSummary {
            run_id: self.run_id.clone(),
            n: self.system.len(),
            steps: self.step,
            initial_energy: self.history.total_energy(0).unwrap_or(0.0),
            final_energy: self.history.total_energy(last).unwrap_or(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::output::{MemorySink, SnapshotRenderer};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn invalid_config_is_rejected_up_front() {
        let mut rng = StdRng::seed_from_u64(0);
        let cfg = RunConfig::new("bad", -0.01, 0.1, 1.0, 5, 1.0);
        let err = Simulation::new(&cfg, &mut rng).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::InvalidConfig);
    }

    #[test]
    fn history_has_one_entry_per_step_plus_initial() {
        let mut rng = StdRng::seed_from_u64(0);
        let cfg = RunConfig::new("h", 0.1, 0.1, 1.0, 4, 1.0);
        let mut sim = Simulation::new(&cfg, &mut rng).unwrap();
        assert_eq!(sim.history().len(), 1);

        let summary = sim.run_silent();
        assert_eq!(summary.steps, 10);
        assert_eq!(sim.history().len(), 11);
        assert_eq!(sim.history().time()[0], 0.0);
    }

    #[test]
    fn render_every_thins_frames_but_keeps_last() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut cfg = RunConfig::new("thin", 0.1, 0.1, 1.0, 3, 1.0);
        cfg.render_every = 3;

        let mut sim = Simulation::new(&cfg, &mut rng).unwrap();
        let mut sink = MemorySink::new();
        sim.run(&mut SnapshotRenderer::default(), &mut sink).unwrap();

        let steps: Vec<usize> = sink.frames("thin").iter().map(|f| f.step).collect();
        assert_eq!(steps, vec![3, 6, 9, 10]);
        assert_eq!(sink.finished, vec!["thin".to_string()]);
    }

    #[test]
    fn frames_carry_at_most_ten_trail_snapshots() {
        let mut rng = StdRng::seed_from_u64(5);
        let cfg = RunConfig::new("trail", 0.05, 0.1, 1.0, 3, 1.0);
        let mut sim = Simulation::new(&cfg, &mut rng).unwrap();
        let mut sink = MemorySink::new();
        sim.run(&mut SnapshotRenderer::default(), &mut sink).unwrap();

        let frames = sink.frames("trail");
        assert_eq!(frames.len(), 20);
        assert_eq!(frames[0].trail.len(), 1);
        assert!(frames.iter().all(|f| f.trail.len() <= TRAIL_WINDOW));
        assert_eq!(frames[19].trail.len(), TRAIL_WINDOW);
    }

    #[test]
    fn huge_step_count_is_invalid_not_a_panic() {
        let mut rng = StdRng::seed_from_u64(0);
        let cfg = RunConfig::new("h", 1e-300, 0.1, 1e300, 1, 1.0);
        let err = Simulation::new(&cfg, &mut rng).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::InvalidConfig);
    }

    #[test]
    fn rerun_replaces_earlier_frames() {
        let mut sink = MemorySink::new();
        let mut renderer = SnapshotRenderer::default();

        let long = RunConfig::new("r", 0.1, 0.1, 2.0, 3, 1.0);
        Simulation::new(&long, &mut StdRng::seed_from_u64(1)).unwrap().run(&mut renderer, &mut sink).unwrap();
        assert_eq!(sink.frames("r").len(), 20);

        let short = RunConfig::new("r", 0.1, 0.1, 1.0, 3, 1.0);
        Simulation::new(&short, &mut StdRng::seed_from_u64(1)).unwrap().run(&mut renderer, &mut sink).unwrap();
        assert_eq!(sink.frames("r").len(), 10);
        assert_eq!(sink.finished, vec!["r".to_string()]);
    }

    #[test]
    fn drift_of_zero_energy_is_absolute() {
        assert_eq!(relative_drift(0.0, 0.5), 0.5);
        assert!((relative_drift(-2.0, -2.2) - 0.1).abs() < 1e-12);
    }
}
