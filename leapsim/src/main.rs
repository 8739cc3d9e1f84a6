use leapsim::{load_batch, run_batch, bench_leapfrog};
use leapsim::benchmark::benchmark::DEFAULT_NS;

use clap::Parser;
use anyhow::{Context, Result};

use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// Batch file; looked up under scenarios/ when not an existing path
    #[arg(short, default_value = "default.yaml")]
    file_name: String,

    /// Print per-step timings for a range of N instead of running the batch
    #[arg(long)]
    bench: bool,

    /// Steps per N when benchmarking
    #[arg(long, default_value_t = 20)]
    bench_steps: usize,
}

// resolve here to keep main clean
fn resolve_batch_path(file_name: &str) -> PathBuf {
    let direct = PathBuf::from(file_name);
    if direct.exists() {
        return direct;
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if args.bench {
        bench_leapfrog(&DEFAULT_NS, args.bench_steps);
        return Ok(());
    }

    let path = resolve_batch_path(&args.file_name);
    let batch = load_batch(&path).with_context(|| format!("failed to load batch {}", path.display()))?;

    let summaries = run_batch(&batch)?;
    for s in &summaries {
        println!(
            "{:>12}  N = {:5}  steps = {:6}  TE0 = {:12.6}  TE = {:12.6}  drift = {:.3e}",
            s.run_id, s.n, s.steps, s.initial_energy, s.final_energy, s.relative_drift()
        );
    }

    Ok(())
}
