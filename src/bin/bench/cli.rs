// Benchmark Driver CLI - flags with environment fallbacks

use std::path::PathBuf;

use clap::Parser;
use mesh_heal_bench::competitive::{DEFAULT_ITERATIONS, DEFAULT_SEED};
use mesh_heal_bench::{BenchConfig, SeedStrategy};

#[derive(Parser, Debug)]
#[command(name = "bench")]
#[command(about = "Competitive self-healing benchmark across mesh routing profiles", long_about = None)]
pub struct CliArgs {
    /// Samples per (profile, scenario) pair
    #[arg(long, env = "MESH_BENCH_ITERATIONS", default_value_t = DEFAULT_ITERATIONS)]
    pub iterations: usize,

    /// Run seed
    #[arg(long, env = "MESH_BENCH_SEED", default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Comma-separated subset of the default profiles (all when omitted)
    #[arg(long, env = "MESH_BENCH_PROFILES")]
    pub profiles: Option<String>,

    /// Directory for the JSON + Markdown reports
    #[arg(long, env = "MESH_BENCH_OUTPUT_DIR", default_value = "benchmarks/results")]
    pub output_dir: PathBuf,

    /// Per-sample seed derivation: additive | hashed
    #[arg(long, default_value = "additive")]
    pub seed_strategy: SeedStrategy,

    /// Run profiles on a thread pool (same numbers as sequential)
    #[arg(long)]
    pub parallel: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,
}

impl CliArgs {
    pub fn bench_config(&self) -> BenchConfig {
        BenchConfig {
            iterations: self.iterations,
            seed: self.seed,
            seed_strategy: self.seed_strategy,
            parallel: self.parallel,
        }
    }
}
