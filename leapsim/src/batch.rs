//! Independent runs executed in parallel
//!
//! Every run owns its RNG, renderer, sink namespace and simulation state.
//! Nothing is shared between runs, so a plain rayon `par_iter` is enough.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

use crate::configuration::config::{BatchConfig, RunConfig};
use crate::error::SimError;
use crate::output::{DirectorySink, SnapshotRenderer};
use crate::simulation::runner::{RunSummary, Simulation};

/// Run one config to completion with its own seeded generator
pub fn run_one(batch: &BatchConfig, run: &RunConfig) -> Result<RunSummary, SimError> {
    let mut rng = StdRng::seed_from_u64(batch.seed_for(run));
    let mut sim = Simulation::new(run, &mut rng)?;

    let mut renderer = SnapshotRenderer::default();
    let mut sink = DirectorySink::new(&batch.output_dir);
    sim.run(&mut renderer, &mut sink)
}

/// Run every config in `batch` in parallel. Results keep config order.
/// All configs are validated before any run starts.
pub fn run_batch(batch: &BatchConfig) -> Result<Vec<RunSummary>, SimError> {
    for run in &batch.runs {
        run.validate()?;
    }
    check_unique_ids(&batch.runs)?;

    log::info!("starting {} runs into {}", batch.runs.len(), batch.output_dir.display());

    batch
        .runs
        .par_iter()
        .map(|run| run_one(batch, run))
        .collect()
}

fn check_unique_ids(runs: &[RunConfig]) -> Result<(), SimError> {
    let mut seen = std::collections::HashSet::new();
    for run in runs {
        if !seen.insert(run.run_id.as_str()) {
            return Err(SimError::invalid(format!("duplicate run_id '{}'", run.run_id)));
        }
    }
    Ok(())
}
