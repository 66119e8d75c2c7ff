// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Mesh Self-Healing Benchmark Engine - Report Serialization
//
// Writes competitive_self_healing_<YYYYMMDD_HHMMSS>.{json,md} pairs.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::info;

use crate::error::Result;
use crate::types::CompetitiveBenchmarkReport;

pub const REPORT_FILE_PREFIX: &str = "competitive_self_healing";

/// Full structural JSON dump of the report.
pub fn to_json(report: &CompetitiveBenchmarkReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Parse a report previously produced by [`to_json`].
pub fn from_json(json: &str) -> Result<CompetitiveBenchmarkReport> {
    Ok(serde_json::from_str(json)?)
}

/// Human-readable summary. Not meant for machine parsing.
pub fn to_markdown(report: &CompetitiveBenchmarkReport) -> String {
    Markdown(report).to_string()
}

/// Write the JSON and Markdown renderings into `output_dir`, creating it if
/// needed. Returns `(json_path, markdown_path)`.
///
/// Files are stamped to the second; two saves in the same second into the
/// same directory overwrite each other.
pub fn save_report(
    report: &CompetitiveBenchmarkReport,
    output_dir: impl AsRef<Path>,
) -> Result<(PathBuf, PathBuf)> {
    let dir = output_dir.as_ref();
    fs::create_dir_all(dir)?;

    let stamp = Utc::now().format("%Y%m%d_%H%M%S");
    let json_path = dir.join(format!("{REPORT_FILE_PREFIX}_{stamp}.json"));
    let md_path = dir.join(format!("{REPORT_FILE_PREFIX}_{stamp}.md"));

    fs::write(&json_path, to_json(report)?)?;
    fs::write(&md_path, to_markdown(report))?;

    info!(json = %json_path.display(), markdown = %md_path.display(), "report saved");
    Ok((json_path, md_path))
}

/// Read a saved JSON report.
pub fn load_report(path: impl AsRef<Path>) -> Result<CompetitiveBenchmarkReport> {
    let content = fs::read_to_string(path)?;
    from_json(&content)
}

struct Markdown<'a>(&'a CompetitiveBenchmarkReport);

impl fmt::Display for Markdown<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.0;

        writeln!(f, "# Competitive Self-Healing Benchmark")?;
        writeln!(f)?;
        writeln!(f, "- Generated: {}", r.generated_at)?;
        writeln!(f, "- Iterations per scenario: {}", r.iterations_per_scenario)?;
        writeln!(f, "- Seed: {} ({} seed derivation)", r.seed, r.seed_strategy)?;
        writeln!(f)?;

        writeln!(f, "## Ranking by p95 failover")?;
        writeln!(f)?;
        for (i, name) in r.ranking_by_p95_failover.iter().enumerate() {
            writeln!(f, "{}. {}", i + 1, name)?;
        }
        writeln!(f)?;

        writeln!(f, "## Profiles")?;
        writeln!(f)?;
        writeln!(f, "| Profile | Routing style | p95 failover (ms) | Mean failover (ms) | p95 packet loss (%) |")?;
        writeln!(f, "|---------|---------------|-------------------|--------------------|---------------------|")?;
        for p in &r.profiles {
            writeln!(
                f,
                "| {} | {} | {:.2} | {:.2} | {:.3} |",
                p.profile,
                p.routing_style,
                p.overall_p95_failover_ms,
                p.overall_mean_failover_ms,
                p.overall_p95_packet_loss_pct,
            )?;
        }
        writeln!(f)?;

        writeln!(f, "## Scenario breakdown")?;
        for p in &r.profiles {
            writeln!(f)?;
            writeln!(f, "### {}", p.profile)?;
            writeln!(f)?;
            writeln!(f, "| Scenario | Failure | Mean (ms) | p95 (ms) | p99 (ms) | Mean loss (%) | p95 loss (%) |")?;
            writeln!(f, "|----------|---------|-----------|----------|----------|---------------|--------------|")?;
            for s in &p.scenarios {
                writeln!(
                    f,
                    "| {} | {} | {:.2} | {:.2} | {:.2} | {:.3} | {:.3} |",
                    s.scenario_id,
                    s.failure_type,
                    s.mean_failover_ms,
                    s.p95_failover_ms,
                    s.p99_failover_ms,
                    s.mean_packet_loss_pct,
                    s.p95_packet_loss_pct,
                )?;
            }
        }
        writeln!(f)?;

        writeln!(f, "## Notes")?;
        writeln!(f)?;
        for note in &r.notes {
            writeln!(f, "- {note}")?;
        }
        Ok(())
    }
}
