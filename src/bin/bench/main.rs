// Competitive Self-Healing Benchmark Driver
// Runs the default scenarios against the selected profiles and writes
// competitive_self_healing_<timestamp>.{json,md}
//
// Usage:
//   cargo run --release --bin bench                                   # all profiles, 200 iterations, seed 42
//   cargo run --release --bin bench -- --iterations 80 --seed 11
//   cargo run --release --bin bench -- --profiles rajant-like,x0tta6bl4-current
//   cargo run --release --bin bench -- --seed-strategy hashed --parallel

mod cli;

use std::process::ExitCode;

use clap::Parser;
use mesh_heal_bench::fixtures::parse_profile_list;
use mesh_heal_bench::{
    default_profiles, default_scenarios, logging, run_competitive_benchmark_with, save_report,
    select_profiles, BenchError, CompetitiveBenchmarkReport,
};

use cli::CliArgs;

// ─── Main ───────────────────────────────────────────────────────────────────

fn main() -> ExitCode {
    let cli = CliArgs::parse();
    if cli.json_logs {
        logging::init_json();
    } else {
        logging::init();
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &CliArgs) -> Result<(), BenchError> {
    // Resolve names before anything is simulated.
    let profiles = match &cli.profiles {
        Some(raw) => {
            let names = parse_profile_list(raw);
            if names.is_empty() {
                return Err(BenchError::InvalidArgument("--profiles is empty".to_string()));
            }
            select_profiles(&names)?
        }
        None => default_profiles(),
    };
    let scenarios = default_scenarios();

    let report = run_competitive_benchmark_with(&profiles, &scenarios, &cli.bench_config())?;
    let (json_path, md_path) = save_report(&report, &cli.output_dir)?;

    println!("JSON report: {}", json_path.display());
    println!("Markdown report: {}", md_path.display());
    print_ranking(&report);
    Ok(())
}

fn print_ranking(report: &CompetitiveBenchmarkReport) {
    println!("Ranking by p95 failover:");
    for (i, name) in report.ranking_by_p95_failover.iter().enumerate() {
        let p95 = report
            .profile(name)
            .map(|p| p.overall_p95_failover_ms)
            .unwrap_or_default();
        println!("  {}. {:<32} p95={:.2}ms", i + 1, name, p95);
    }
}
