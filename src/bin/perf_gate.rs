// Competitive Self-Healing Performance Gate
// Fails CI when the simulated self-healing numbers regress past the thresholds
// in a JSON config, or past a saved baseline report.
//
// Usage:
//   cargo run --release --bin perf-gate -- --config config/competitive_gate.json
//   cargo run --release --bin perf-gate -- --config config/competitive_gate.json --iterations 300 --seed 7
//   cargo run --release --bin perf-gate -- --config config/competitive_gate.json --report benchmarks/results/x.json
//   cargo run --release --bin perf-gate -- --baseline benchmarks/baseline.json --regression-threshold-pct 10
//
// Exit codes: 0 pass, 1 threshold violation or regression, 2 config/run error.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use mesh_heal_bench::competitive::{DEFAULT_ITERATIONS, DEFAULT_SEED};
use mesh_heal_bench::gate::{save_regression_report, DEFAULT_REGRESSION_THRESHOLD_PCT};
use mesh_heal_bench::{
    default_profiles, default_scenarios, detect_regressions, evaluate_gate, load_report, logging,
    run_competitive_benchmark, BenchError, CompetitiveBenchmarkReport, GateConfig, RegressionReport,
};

#[derive(Parser, Debug)]
#[command(name = "perf-gate")]
#[command(about = "Check competitive self-healing results against CI thresholds", long_about = None)]
struct GateArgs {
    /// Threshold configuration (JSON)
    #[arg(long, env = "MESH_GATE_CONFIG", required_unless_present = "baseline")]
    config: Option<PathBuf>,

    /// Samples per (profile, scenario) pair when running the benchmark
    #[arg(long, env = "MESH_BENCH_ITERATIONS", default_value_t = DEFAULT_ITERATIONS)]
    iterations: usize,

    /// Run seed
    #[arg(long, env = "MESH_BENCH_SEED", default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Evaluate a saved JSON report instead of running the benchmark
    #[arg(long)]
    report: Option<PathBuf>,

    /// Also write the verdict as JSON to this path
    #[arg(long)]
    verdict_out: Option<PathBuf>,

    /// Baseline report to compare against
    #[arg(long, env = "MESH_GATE_BASELINE")]
    baseline: Option<PathBuf>,

    /// Percent worsening of a metric that counts as a regression
    #[arg(long, default_value_t = DEFAULT_REGRESSION_THRESHOLD_PCT)]
    regression_threshold_pct: f64,

    /// Directory for regression_report_<stamp>.json
    #[arg(long)]
    regression_out: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = GateArgs::parse();
    logging::init();

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(2)
        }
    }
}

/// Returns whether every requested check passed.
fn run(args: &GateArgs) -> Result<bool, BenchError> {
    let report = obtain_report(args)?;
    let mut passed = true;

    if let Some(config_path) = &args.config {
        let config = GateConfig::load(config_path)?;
        let verdict = evaluate_gate(&report, &config);

        for line in &verdict.summary_lines {
            println!("{line}");
        }
        println!("Gate status: {}", verdict.status());
        for violation in &verdict.violations {
            println!("  - {violation}");
        }

        if let Some(path) = &args.verdict_out {
            let json = serde_json::to_string_pretty(&verdict.to_record())?;
            std::fs::write(path, json)?;
        }
        passed &= verdict.passed();
    }

    if let Some(baseline_path) = &args.baseline {
        if args.regression_threshold_pct < 0.0 {
            return Err(BenchError::InvalidArgument(format!(
                "regression threshold must be >= 0, got {}",
                args.regression_threshold_pct
            )));
        }
        let baseline = load_report(baseline_path)?;
        let regressions = detect_regressions(&baseline, &report, args.regression_threshold_pct);
        print_regressions(&regressions);

        if let Some(dir) = &args.regression_out {
            let path = save_regression_report(&regressions, dir)?;
            println!("Regression report: {}", path.display());
        }
        passed &= !regressions.has_regressions();
    }

    Ok(passed)
}

fn print_regressions(r: &RegressionReport) {
    println!(
        "Regression check vs baseline {} (threshold {:.1}%): {}",
        r.baseline_timestamp, r.threshold_pct, r.status
    );
    for name in &r.missing_profiles {
        println!("  - missing profile in current report: {name}");
    }
    for g in &r.regressions {
        println!(
            "  - [{:?}] {} {}: {:.3} -> {:.3} (+{:.2}%)",
            g.severity, g.profile, g.metric, g.baseline, g.current, g.percent_change
        );
    }
    for i in &r.improvements {
        println!(
            "  + {} {}: {:.3} -> {:.3} (-{:.2}%)",
            i.profile, i.metric, i.baseline, i.current, i.percent_improvement
        );
    }
}

fn obtain_report(args: &GateArgs) -> Result<CompetitiveBenchmarkReport, BenchError> {
    match &args.report {
        Some(path) => load_report(path),
        None => run_competitive_benchmark(
            &default_profiles(),
            &default_scenarios(),
            args.iterations,
            args.seed,
        ),
    }
}
