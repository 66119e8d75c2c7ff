// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Mesh Self-Healing Benchmark Engine

//! Seeded Monte-Carlo comparison of mesh routing architectures under failure.
//!
//! Each [`Profile`] is run against each [`Scenario`] for a fixed number of
//! samples. Every sample seeds its own ChaCha8 generator from a pure function
//! of the run seed, so a report is reproducible bit for bit. Profiles are
//! ranked by pooled p95 failover (p95 packet loss breaks ties) and the report
//! can be written as JSON + Markdown and checked by the CI [`gate`].
//!
//! ```no_run
//! use mesh_heal_bench::{default_profiles, default_scenarios, run_competitive_benchmark, save_report};
//!
//! let report = run_competitive_benchmark(&default_profiles(), &default_scenarios(), 200, 42)?;
//! let (json, md) = save_report(&report, "benchmarks/results")?;
//! println!("{} {}", json.display(), md.display());
//! # Ok::<(), mesh_heal_bench::BenchError>(())
//! ```

pub mod competitive;
pub mod error;
pub mod fixtures;
pub mod gate;
pub mod logging;
pub mod report;
pub mod runner;
pub mod sampler;
pub mod seed;
pub mod stats;
pub mod types;

pub use competitive::{run_competitive_benchmark, run_competitive_benchmark_with, BenchConfig};
pub use error::{BenchError, Result};
pub use fixtures::{default_profiles, default_scenarios, select_profiles};
pub use gate::{detect_regressions, evaluate_gate, GateConfig, GateVerdict, RegressionReport};
pub use report::{load_report, save_report, to_json, to_markdown};
pub use runner::{run_profile_benchmark, run_profile_benchmark_with};
pub use sampler::{simulate_failover_ms, simulate_packet_loss_pct};
pub use seed::SeedStrategy;
pub use stats::percentile;
pub use types::*;
