// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Mesh Self-Healing Benchmark Engine - Failover / Packet-Loss Sampler
//
// Closed-form failover model plus seeded noise. Draw order per sample is part
// of the output contract: the Gaussian jitter (two uniforms) is drawn first,
// then the loss uniform.

use rand::Rng;

use crate::types::{Profile, Scenario};

/// Failover samples never drop below this.
pub const MIN_FAILOVER_MS: f64 = 0.1;
/// Packet-loss samples never drop below this.
pub const MIN_PACKET_LOSS_PCT: f64 = 0.01;

const TOPOLOGY_BASELINE_NODES: f64 = 100.0;
const TOPOLOGY_SPAN_NODES: f64 = 900.0;
const NODES_PER_FAILURE_DOMAIN: f64 = 60.0;
const INTERFERENCE_PENALTY_MS: f64 = 12.0;
const DISTRIBUTED_DISCOUNT_MS: f64 = 8.0;
const CONCURRENCY_PENALTY_MS: f64 = 25.0;

const LOSS_PER_FAILOVER_SEC: f64 = 0.35;
const LOSS_PER_INTERFERENCE: f64 = 0.40;
const LOSS_PER_CONCURRENT_FAILURE: f64 = 0.03;
const LOSS_DISTRIBUTED_DISCOUNT: f64 = 0.15;
const LOSS_NOISE_PCT: f64 = 0.03;

/// One synthetic failover time in milliseconds.
pub fn simulate_failover_ms<R: Rng + ?Sized>(profile: &Profile, scenario: &Scenario, rng: &mut R) -> f64 {
    let node_count = scenario.node_count as f64;
    let radios = profile.multi_radio_factor.max(1.0);

    let topology_pressure = ((node_count - TOPOLOGY_BASELINE_NODES) / TOPOLOGY_SPAN_NODES).max(0.0);
    let concurrency_pressure =
        scenario.concurrent_failures as f64 / (node_count / NODES_PER_FAILURE_DOMAIN).max(1.0);
    let interference_penalty = scenario.interference_level * (INTERFERENCE_PENALTY_MS / radios);
    let distributed_discount = profile.distributed_weight * DISTRIBUTED_DISCOUNT_MS;
    let control_penalty = profile.control_plane_penalty_ms * (1.0 + topology_pressure);
    let concurrency_penalty = (concurrency_pressure * CONCURRENCY_PENALTY_MS) / radios;
    let jitter = gaussian(rng, 0.0, profile.jitter_ms);

    let value = profile.base_failover_ms
        + scenario.complexity_factor
        + interference_penalty
        + control_penalty
        + concurrency_penalty
        - distributed_discount
        + jitter;

    value.max(MIN_FAILOVER_MS)
}

/// One synthetic packet-loss percentage for a failover window of `failover_ms`.
pub fn simulate_packet_loss_pct<R: Rng + ?Sized>(
    profile: &Profile,
    scenario: &Scenario,
    failover_ms: f64,
    rng: &mut R,
) -> f64 {
    let noise = rng.gen_range(-LOSS_NOISE_PCT..LOSS_NOISE_PCT);
    let loss = profile.packet_loss_base_pct
        + (failover_ms / 1000.0) * LOSS_PER_FAILOVER_SEC
        + scenario.interference_level * LOSS_PER_INTERFERENCE
        + scenario.concurrent_failures as f64 * LOSS_PER_CONCURRENT_FAILURE
        - profile.distributed_weight * LOSS_DISTRIBUTED_DISCOUNT
        + noise;

    loss.max(MIN_PACKET_LOSS_PCT)
}

/// Normal draw via Box-Muller. Always consumes two uniforms, so a zero
/// `std_dev` returns exactly `mean` without shifting later draws.
pub fn gaussian<R: Rng + ?Sized>(rng: &mut R, mean: f64, std_dev: f64) -> f64 {
    // gen::<f64>() is in [0, 1); flip it so ln() never sees zero.
    let u1: f64 = 1.0 - rng.gen::<f64>();
    let u2: f64 = rng.gen();
    let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
    if std_dev == 0.0 {
        return mean;
    }
    mean + std_dev * z
}
