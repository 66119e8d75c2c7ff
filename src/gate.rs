// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Mesh Self-Healing Benchmark Engine - CI Performance Gate
//
// A threshold breach is a normal outcome recorded as a violation string, never
// an error. Only loading the threshold file can fail.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::fixtures::{PROFILE_CURRENT, PROFILE_RAJANT, PROFILE_TARGET};
use crate::types::{CompetitiveBenchmarkReport, ProfileSummary};

// ─── Threshold Configuration ────────────────────────────────────────────────

/// Absolute limits for one profile. `None` skips that check.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileThreshold {
    #[serde(default)]
    pub max_p95_failover_ms: Option<f64>,
    #[serde(default)]
    pub max_p95_packet_loss_pct: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelativeThresholds {
    /// Required `(current - target) / current * 100` on p95 failover.
    #[serde(default)]
    pub min_target_improvement_vs_current_pct: Option<f64>,
    /// Allowed `current / rajant` on p95 failover.
    #[serde(default)]
    pub max_current_to_rajant_p95_failover_ratio: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankingThresholds {
    /// Must appear verbatim at the head of `ranking_by_p95_failover`.
    #[serde(default)]
    pub expected_order_prefix: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GateConfig {
    #[serde(default)]
    pub profiles: BTreeMap<String, ProfileThreshold>,
    #[serde(default)]
    pub relative: RelativeThresholds,
    #[serde(default)]
    pub ranking: RankingThresholds,
}

impl GateConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }
}

// ─── Verdict ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GateVerdict {
    /// One line per profile in report order.
    pub summary_lines: Vec<String>,
    pub violations: Vec<String>,
}

impl GateVerdict {
    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn status(&self) -> &'static str {
        if self.passed() { "PASS" } else { "FAIL" }
    }

    pub fn to_record(&self) -> GateRecord {
        GateRecord {
            timestamp: Utc::now().to_rfc3339(),
            status: self.status().to_string(),
            total_violations: self.violations.len(),
            violations: self.violations.clone(),
        }
    }
}

/// Machine-readable gate outcome for CI artifacts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateRecord {
    pub timestamp: String,
    pub status: String,
    pub total_violations: usize,
    pub violations: Vec<String>,
}

// ─── Evaluation ─────────────────────────────────────────────────────────────

pub fn summary_line(p: &ProfileSummary) -> String {
    format!(
        "{}: p95_failover={:.2}ms mean_failover={:.2}ms p95_loss={:.3}%",
        p.profile, p.overall_p95_failover_ms, p.overall_mean_failover_ms, p.overall_p95_packet_loss_pct
    )
}

fn missing(name: &str) -> String {
    format!("missing profile in report: {name}")
}

/// Check a report against every configured threshold.
pub fn evaluate_gate(report: &CompetitiveBenchmarkReport, config: &GateConfig) -> GateVerdict {
    let mut verdict = GateVerdict {
        summary_lines: report.profiles.iter().map(summary_line).collect(),
        violations: Vec::new(),
    };
    let v = &mut verdict.violations;

    check_absolute(report, config, v);
    check_improvement(report, &config.relative, v);
    check_rajant_ratio(report, &config.relative, v);
    check_ranking_prefix(report, &config.ranking, v);

    // A missing profile can be referenced by several checks; report it once.
    let mut seen = HashSet::new();
    verdict.violations.retain(|m| seen.insert(m.clone()));
    verdict
}

fn check_absolute(report: &CompetitiveBenchmarkReport, config: &GateConfig, v: &mut Vec<String>) {
    for (name, limits) in &config.profiles {
        let Some(p) = report.profile(name) else {
            v.push(missing(name));
            continue;
        };
        if let Some(max) = limits.max_p95_failover_ms {
            if p.overall_p95_failover_ms > max {
                v.push(format!(
                    "{name}: p95 failover {:.2}ms exceeds max {:.2}ms",
                    p.overall_p95_failover_ms, max
                ));
            }
        }
        if let Some(max) = limits.max_p95_packet_loss_pct {
            if p.overall_p95_packet_loss_pct > max {
                v.push(format!(
                    "{name}: p95 packet loss {:.3}% exceeds max {:.3}%",
                    p.overall_p95_packet_loss_pct, max
                ));
            }
        }
    }
}

fn check_improvement(report: &CompetitiveBenchmarkReport, rel: &RelativeThresholds, v: &mut Vec<String>) {
    let Some(min_pct) = rel.min_target_improvement_vs_current_pct else {
        return;
    };
    let (current, target) = match (report.profile(PROFILE_CURRENT), report.profile(PROFILE_TARGET)) {
        (Some(c), Some(t)) => (c.overall_p95_failover_ms, t.overall_p95_failover_ms),
        (c, t) => {
            if c.is_none() {
                v.push(missing(PROFILE_CURRENT));
            }
            if t.is_none() {
                v.push(missing(PROFILE_TARGET));
            }
            return;
        }
    };
    if current <= 0.0 {
        v.push(format!("{PROFILE_CURRENT}: p95 failover is zero, improvement undefined"));
        return;
    }
    let improvement = (current - target) / current * 100.0;
    if improvement < min_pct {
        v.push(format!(
            "{PROFILE_TARGET} improves p95 failover by {improvement:.2}% over {PROFILE_CURRENT}, \
             required >= {min_pct:.2}%"
        ));
    }
}

fn check_rajant_ratio(report: &CompetitiveBenchmarkReport, rel: &RelativeThresholds, v: &mut Vec<String>) {
    let Some(max_ratio) = rel.max_current_to_rajant_p95_failover_ratio else {
        return;
    };
    let (current, rajant) = match (report.profile(PROFILE_CURRENT), report.profile(PROFILE_RAJANT)) {
        (Some(c), Some(r)) => (c.overall_p95_failover_ms, r.overall_p95_failover_ms),
        (c, r) => {
            if c.is_none() {
                v.push(missing(PROFILE_CURRENT));
            }
            if r.is_none() {
                v.push(missing(PROFILE_RAJANT));
            }
            return;
        }
    };
    if rajant <= 0.0 {
        v.push(format!("{PROFILE_RAJANT}: p95 failover is zero, ratio undefined"));
        return;
    }
    let ratio = current / rajant;
    if ratio > max_ratio {
        v.push(format!(
            "{PROFILE_CURRENT}/{PROFILE_RAJANT} p95 failover ratio {ratio:.2} exceeds max {max_ratio:.2}"
        ));
    }
}

fn check_ranking_prefix(report: &CompetitiveBenchmarkReport, ranking: &RankingThresholds, v: &mut Vec<String>) {
    let expected = &ranking.expected_order_prefix;
    if expected.is_empty() {
        return;
    }
    let absent: Vec<&String> = expected.iter().filter(|n| report.profile(n).is_none()).collect();
    if !absent.is_empty() {
        v.extend(absent.into_iter().map(|n| missing(n)));
        return;
    }
    let actual = &report.ranking_by_p95_failover;
    if !actual.starts_with(expected) {
        v.push(format!(
            "ranking prefix mismatch: expected [{}], got [{}]",
            expected.join(", "),
            actual.join(", ")
        ));
    }
}

// ─── Baseline Regression Detection ──────────────────────────────────────────

/// Improvements smaller than this are treated as noise.
pub const IMPROVEMENT_NOISE_PCT: f64 = 5.0;
/// Regressions above this are critical.
pub const CRITICAL_REGRESSION_PCT: f64 = 50.0;
pub const DEFAULT_REGRESSION_THRESHOLD_PCT: f64 = 10.0;

pub const REGRESSION_FILE_PREFIX: &str = "regression_report";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Warning,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Regression {
    pub profile: String,
    pub metric: String,
    pub baseline: f64,
    pub current: f64,
    /// `(current - baseline) / baseline * 100`; positive is worse.
    pub percent_change: f64,
    pub severity: Severity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Improvement {
    pub profile: String,
    pub metric: String,
    pub baseline: f64,
    pub current: f64,
    pub percent_improvement: f64,
}

/// Outcome of comparing a current report against a baseline report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionReport {
    pub timestamp: String,
    pub baseline_timestamp: String,
    pub current_timestamp: String,
    pub threshold_pct: f64,
    pub total_regressions: usize,
    pub total_improvements: usize,
    pub regressions: Vec<Regression>,
    pub improvements: Vec<Improvement>,
    /// Baseline profiles absent from the current report.
    pub missing_profiles: Vec<String>,
    /// `OK` or `REGRESSION_DETECTED`.
    pub status: String,
}

impl RegressionReport {
    pub fn has_regressions(&self) -> bool {
        !self.regressions.is_empty() || !self.missing_profiles.is_empty()
    }
}

// All tracked metrics are lower-is-better.
fn tracked_metrics(p: &ProfileSummary) -> [(&'static str, f64); 3] {
    [
        ("overall_mean_failover_ms", p.overall_mean_failover_ms),
        ("overall_p95_failover_ms", p.overall_p95_failover_ms),
        ("overall_p95_packet_loss_pct", p.overall_p95_packet_loss_pct),
    ]
}

/// Compare every profile of `baseline` with the same profile in `current`.
///
/// A metric that worsens by more than `threshold_pct` is a regression
/// (critical above 50%). One that improves by more than 5% is listed as an
/// improvement. Profiles only present in `current` are ignored.
pub fn detect_regressions(
    baseline: &CompetitiveBenchmarkReport,
    current: &CompetitiveBenchmarkReport,
    threshold_pct: f64,
) -> RegressionReport {
    let mut regressions = Vec::new();
    let mut improvements = Vec::new();
    let mut missing_profiles = Vec::new();

    for base in &baseline.profiles {
        let Some(cur) = current.profile(&base.profile) else {
            missing_profiles.push(base.profile.clone());
            continue;
        };
        for ((metric, b), (_, c)) in tracked_metrics(base).into_iter().zip(tracked_metrics(cur)) {
            if b <= 0.0 {
                continue;
            }
            let change = (c - b) / b * 100.0;
            if change > threshold_pct {
                regressions.push(Regression {
                    profile: base.profile.clone(),
                    metric: metric.to_string(),
                    baseline: b,
                    current: c,
                    percent_change: change,
                    severity: if change > CRITICAL_REGRESSION_PCT {
                        Severity::Critical
                    } else {
                        Severity::Warning
                    },
                });
            } else if change < -IMPROVEMENT_NOISE_PCT {
                improvements.push(Improvement {
                    profile: base.profile.clone(),
                    metric: metric.to_string(),
                    baseline: b,
                    current: c,
                    percent_improvement: -change,
                });
            }
        }
    }

    let failed = !regressions.is_empty() || !missing_profiles.is_empty();
    RegressionReport {
        timestamp: Utc::now().to_rfc3339(),
        baseline_timestamp: baseline.generated_at.clone(),
        current_timestamp: current.generated_at.clone(),
        threshold_pct,
        total_regressions: regressions.len(),
        total_improvements: improvements.len(),
        regressions,
        improvements,
        missing_profiles,
        status: if failed { "REGRESSION_DETECTED" } else { "OK" }.to_string(),
    }
}

/// Write `regression_report_<YYYYMMDD_HHMMSS>.json` into `output_dir`.
pub fn save_regression_report(report: &RegressionReport, output_dir: impl AsRef<Path>) -> Result<PathBuf> {
    let dir = output_dir.as_ref();
    fs::create_dir_all(dir)?;
    let stamp = Utc::now().format("%Y%m%d_%H%M%S");
    let path = dir.join(format!("{REGRESSION_FILE_PREFIX}_{stamp}.json"));
    fs::write(&path, serde_json::to_string_pretty(report)?)?;
    info!(path = %path.display(), status = %report.status, "regression report saved");
    Ok(path)
}
