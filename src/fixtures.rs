// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Mesh Self-Healing Benchmark Engine - Reference Profiles and Scenarios
//
// Downstream drivers and the CI gate pin expectations against these numbers.
// The centralized-control-plane profile is deliberately the worst and the
// hardware multi-radio profile the best. Values are calibrated to the ordering,
// improvement and ratio margins config/competitive_gate.json enforces; a retune
// must keep them (tests/benchmark_tests.rs loads that file).

use crate::error::{BenchError, Result};
use crate::types::{Profile, Scenario};

pub const PROFILE_CURRENT: &str = "x0tta6bl4-current";
pub const PROFILE_TARGET: &str = "x0tta6bl4-make-make-target";
pub const PROFILE_RAJANT: &str = "rajant-like";
pub const PROFILE_ISTIO: &str = "istio-like-wan";

#[allow(clippy::too_many_arguments)]
fn profile(
    name: &str,
    routing_style: &str,
    base_failover_ms: f64,
    jitter_ms: f64,
    packet_loss_base_pct: f64,
    distributed_weight: f64,
    multi_radio_factor: f64,
    control_plane_penalty_ms: f64,
    seed_offset: i64,
) -> Profile {
    Profile {
        name: name.to_string(),
        routing_style: routing_style.to_string(),
        base_failover_ms,
        jitter_ms,
        packet_loss_base_pct,
        distributed_weight,
        multi_radio_factor,
        control_plane_penalty_ms,
        seed_offset,
    }
}

fn scenario(
    scenario_id: &str,
    failure_type: &str,
    node_count: u32,
    concurrent_failures: u32,
    interference_level: f64,
    complexity_factor: f64,
    seed_offset: i64,
) -> Scenario {
    Scenario {
        scenario_id: scenario_id.to_string(),
        failure_type: failure_type.to_string(),
        node_count,
        concurrent_failures,
        interference_level,
        complexity_factor,
        seed_offset,
    }
}

/// The four canonical competing profiles. Fresh values on every call.
pub fn default_profiles() -> Vec<Profile> {
    vec![
        profile(
            PROFILE_CURRENT,
            "batman-adv mesh with MAPE-K healing loop",
            45.0, 8.0, 0.90, 0.70, 1.0, 12.0, 11,
        ),
        profile(
            PROFILE_TARGET,
            "make-make-make-never-break multipath pre-established routes",
            18.0, 4.0, 0.40, 0.90, 2.0, 2.0, 23,
        ),
        profile(
            PROFILE_RAJANT,
            "kinetic mesh, hardware multi-radio instant switchover",
            4.0, 1.5, 0.20, 1.00, 4.0, 0.0, 37,
        ),
        profile(
            PROFILE_ISTIO,
            "centralized service-mesh control plane over WAN",
            70.0, 15.0, 1.40, 0.10, 1.0, 60.0, 53,
        ),
    ]
}

/// The four canonical failure scenarios, increasing in size and difficulty.
pub fn default_scenarios() -> Vec<Scenario> {
    vec![
        scenario("single-link-cut", "link_cut", 50, 1, 0.10, 2.0, 1),
        scenario("node-crash-medium", "node_crash", 200, 2, 0.25, 5.0, 2),
        scenario("interference-spike", "interference_spike", 500, 3, 0.60, 9.0, 3),
        scenario("cascading-partition", "cascading_failure", 1000, 6, 0.45, 15.0, 4),
    ]
}

/// Pick default profiles by name, keeping the requested order.
///
/// Fails on the first unknown name so nothing is simulated for a bad request.
pub fn select_profiles<S: AsRef<str>>(names: &[S]) -> Result<Vec<Profile>> {
    let all = default_profiles();
    names
        .iter()
        .map(|name| {
            let name = name.as_ref().trim();
            all.iter()
                .find(|p| p.name == name)
                .cloned()
                .ok_or_else(|| BenchError::UnknownProfile {
                    name: name.to_string(),
                    known: all.iter().map(|p| p.name.clone()).collect(),
                })
        })
        .collect()
}

/// Split a comma-separated profile list, dropping empty entries.
pub fn parse_profile_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
