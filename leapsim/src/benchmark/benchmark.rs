use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::configuration::config::RunConfig;
use crate::simulation::runner::Simulation;

/// Helper to build a random run of size `n`, `steps` steps long
fn make_config(n: usize, steps: usize) -> RunConfig {
    let dt = 0.01;
    RunConfig::new(format!("bench-{}", n), dt, 0.1, dt * steps as f64, n, 20.0)
}

/// Time a direct-summation leapfrog step for a range of n
/// Paste output directly into excel to graph
pub fn bench_leapfrog(ns: &[usize], steps: usize) {
    println!("N,ms_per_step");

    for &n in ns {
        let cfg = make_config(n, steps);
        let mut rng = StdRng::seed_from_u64(42);
        let mut sim = match Simulation::new(&cfg, &mut rng) {
            Ok(sim) => sim,
            Err(e) => {
                log::warn!("skipping n = {}: {}", n, e);
                continue;
            }
        };

        // Warm up
        sim.step();

        let taken = sim.num_timesteps().saturating_sub(sim.step_index()).max(1);
        let t0 = Instant::now();
        while !sim.is_finished() {
            sim.step();
        }
        let ms = t0.elapsed().as_secs_f64() * 1000.0 / taken as f64;

        println!("{},{:.6}", n, ms);
    }
}

/// N values used by `leapsim --bench`
pub const DEFAULT_NS: [usize; 6] = [50, 100, 200, 400, 800, 1600];
