// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Mesh Self-Healing Benchmark Engine - Type Definitions

use serde::{Deserialize, Serialize};

use crate::seed::SeedStrategy;

// ─── Profile ────────────────────────────────────────────────────────────────

/// Performance characteristics of one routing architecture.
///
/// `name` is the identity of a profile: it keys maps and labels the ranking.
/// Names must be unique within a collection handed to the orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    /// Carried through to reports only.
    pub routing_style: String,
    pub base_failover_ms: f64,
    /// Standard deviation of the per-sample Gaussian noise.
    pub jitter_ms: f64,
    pub packet_loss_base_pct: f64,
    /// 0..1, higher means the routing decision is more decentralized.
    pub distributed_weight: f64,
    /// >= 1, number/diversity of physical paths.
    pub multi_radio_factor: f64,
    /// Fixed latency from a centralized control plane (0 when fully distributed).
    pub control_plane_penalty_ms: f64,
    pub seed_offset: i64,
}

// ─── Scenario ───────────────────────────────────────────────────────────────

/// A failure situation every profile is run against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub scenario_id: String,
    /// Label only (link cut, node crash, interference spike, ...).
    pub failure_type: String,
    pub node_count: u32,
    pub concurrent_failures: u32,
    /// 0..1 RF/environmental interference severity.
    pub interference_level: f64,
    /// Scenario-specific fixed latency addend.
    pub complexity_factor: f64,
    /// Multiplied by 1000 in the additive seed formula.
    pub seed_offset: i64,
}

// ─── Summaries ──────────────────────────────────────────────────────────────

/// Aggregate for one (profile, scenario) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSummary {
    pub scenario_id: String,
    pub failure_type: String,
    pub samples: usize,
    pub mean_failover_ms: f64,
    pub p95_failover_ms: f64,
    pub p99_failover_ms: f64,
    pub mean_packet_loss_pct: f64,
    pub p95_packet_loss_pct: f64,
}

/// Aggregate for one profile across every scenario.
///
/// The `overall_*` fields are computed over the pooled samples of all
/// scenarios, not by averaging the per-scenario summaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSummary {
    pub profile: String,
    pub routing_style: String,
    pub scenarios: Vec<ScenarioSummary>,
    pub total_samples: usize,
    pub overall_mean_failover_ms: f64,
    pub overall_p95_failover_ms: f64,
    pub overall_mean_packet_loss_pct: f64,
    pub overall_p95_packet_loss_pct: f64,
}

// ─── Top-Level Report ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitiveBenchmarkReport {
    /// RFC 3339 UTC timestamp.
    pub generated_at: String,
    pub iterations_per_scenario: usize,
    pub seed: u64,
    #[serde(default)]
    pub seed_strategy: SeedStrategy,
    /// Input profile order.
    pub profiles: Vec<ProfileSummary>,
    /// Profile names, best to worst.
    pub ranking_by_p95_failover: Vec<String>,
    pub notes: Vec<String>,
}

impl CompetitiveBenchmarkReport {
    /// Look up a profile summary by name.
    pub fn profile(&self, name: &str) -> Option<&ProfileSummary> {
        self.profiles.iter().find(|p| p.profile == name)
    }

    /// 1-based position of a profile in the ranking.
    pub fn rank_of(&self, name: &str) -> Option<usize> {
        self.ranking_by_p95_failover
            .iter()
            .position(|n| n == name)
            .map(|i| i + 1)
    }
}
