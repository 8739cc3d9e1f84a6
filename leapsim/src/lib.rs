pub mod simulation;
pub mod configuration;
pub mod output;
pub mod batch;
pub mod benchmark;
pub mod error;

pub use simulation::states::{Body3, System3, NVec3};
pub use simulation::params::{Parameters, GRAVITY};
pub use simulation::forces::{compute_accelerations, Acceleration, NewtonianGravity};
pub use simulation::energy::{compute_energies, Energies};
pub use simulation::integrator::leapfrog_step;
pub use simulation::scenario::{random_system, system_from_bodies};
pub use simulation::history::History;
pub use simulation::runner::{RunSummary, Simulation};

pub use configuration::config::{BatchConfig, BodyConfig, RunConfig, load_batch};

pub use output::{DirectorySink, Frame, FrameSink, MemorySink, Renderer, Snapshot, SnapshotRenderer};

pub use batch::{run_batch, run_one};

pub use benchmark::benchmark::bench_leapfrog;

pub use error::{ErrorKind, SimError};
