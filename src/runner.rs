// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Mesh Self-Healing Benchmark Engine - Profile Benchmark Runner
//
// Every sample builds its own ChaCha8Rng from a derived seed, so a profile's
// numbers depend only on (seed, profile, scenarios, iterations, strategy).

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::sampler::{simulate_failover_ms, simulate_packet_loss_pct};
use crate::seed::SeedStrategy;
use crate::stats::{mean, percentile, sort_samples};
use crate::types::{Profile, ProfileSummary, Scenario, ScenarioSummary};

/// Raw draws for one (profile, scenario) pair, in draw order.
#[derive(Debug, Clone, Default)]
pub struct ScenarioSamples {
    pub failover_ms: Vec<f64>,
    pub packet_loss_pct: Vec<f64>,
}

/// Draw `iterations` failover/loss pairs for one scenario.
pub fn sample_scenario(
    profile: &Profile,
    scenario: &Scenario,
    iterations: usize,
    seed: u64,
    strategy: SeedStrategy,
) -> ScenarioSamples {
    let mut samples = ScenarioSamples {
        failover_ms: Vec::with_capacity(iterations),
        packet_loss_pct: Vec::with_capacity(iterations),
    };
    for i in 0..iterations {
        let sample_seed = strategy.sample_seed(seed, profile, scenario, i as u64);
        let mut rng = ChaCha8Rng::seed_from_u64(sample_seed);
        let failover = simulate_failover_ms(profile, scenario, &mut rng);
        let loss = simulate_packet_loss_pct(profile, scenario, failover, &mut rng);
        samples.failover_ms.push(failover);
        samples.packet_loss_pct.push(loss);
    }
    samples
}

/// Summarize one scenario. Both sample lists must already be sorted.
fn summarize_scenario(scenario: &Scenario, failover: &[f64], loss: &[f64]) -> ScenarioSummary {
    ScenarioSummary {
        scenario_id: scenario.scenario_id.clone(),
        failure_type: scenario.failure_type.clone(),
        samples: failover.len(),
        mean_failover_ms: mean(failover),
        p95_failover_ms: percentile(failover, 95.0),
        p99_failover_ms: percentile(failover, 99.0),
        mean_packet_loss_pct: mean(loss),
        p95_packet_loss_pct: percentile(loss, 95.0),
    }
}

/// Run one profile across every scenario with the additive seed formula.
pub fn run_profile_benchmark(
    profile: &Profile,
    scenarios: &[Scenario],
    iterations: usize,
    seed: u64,
) -> ProfileSummary {
    run_profile_benchmark_with(profile, scenarios, iterations, seed, SeedStrategy::Additive)
}

/// Run one profile across every scenario.
///
/// Per-scenario summaries keep scenario order. The overall statistics are
/// taken over the pooled samples of all scenarios.
pub fn run_profile_benchmark_with(
    profile: &Profile,
    scenarios: &[Scenario],
    iterations: usize,
    seed: u64,
    strategy: SeedStrategy,
) -> ProfileSummary {
    let mut summaries = Vec::with_capacity(scenarios.len());
    let mut pooled_failover = Vec::with_capacity(scenarios.len() * iterations);
    let mut pooled_loss = Vec::with_capacity(scenarios.len() * iterations);

    for scenario in scenarios {
        let ScenarioSamples {
            mut failover_ms,
            mut packet_loss_pct,
        } = sample_scenario(profile, scenario, iterations, seed, strategy);

        sort_samples(&mut failover_ms);
        sort_samples(&mut packet_loss_pct);
        let summary = summarize_scenario(scenario, &failover_ms, &packet_loss_pct);
        debug!(
            profile = %profile.name,
            scenario = %scenario.scenario_id,
            p95_failover_ms = summary.p95_failover_ms,
            p95_packet_loss_pct = summary.p95_packet_loss_pct,
            "scenario summarized"
        );
        summaries.push(summary);

        pooled_failover.extend(failover_ms);
        pooled_loss.extend(packet_loss_pct);
    }

    sort_samples(&mut pooled_failover);
    sort_samples(&mut pooled_loss);

    ProfileSummary {
        profile: profile.name.clone(),
        routing_style: profile.routing_style.clone(),
        scenarios: summaries,
        total_samples: pooled_failover.len(),
        overall_mean_failover_ms: mean(&pooled_failover),
        overall_p95_failover_ms: percentile(&pooled_failover, 95.0),
        overall_mean_packet_loss_pct: mean(&pooled_loss),
        overall_p95_packet_loss_pct: percentile(&pooled_loss, 95.0),
    }
}
